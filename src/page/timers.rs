use super::*;

impl Page {
    pub fn now_ms(&self) -> i64 {
        self.scheduler.now_ms
    }

    pub fn set_timer_step_limit(&mut self, max_steps: usize) -> Result<()> {
        if max_steps == 0 {
            return Err(Error::Runtime(
                "set_timer_step_limit requires at least 1 step".into(),
            ));
        }
        self.scheduler.timer_step_limit = max_steps;
        Ok(())
    }

    pub fn clear_all_timers(&mut self) -> usize {
        let cleared = self.scheduler.task_queue.len();
        self.scheduler.task_queue.clear();
        self.trace_timer_line(format!("[timer] clear_all cleared={cleared}"));
        cleared
    }

    /// Timers still queued, in the order they will fire.
    pub fn pending_timers(&self) -> Vec<PendingTimer> {
        let mut timers = self
            .scheduler
            .task_queue
            .iter()
            .map(|task| PendingTimer {
                id: task.id,
                due_at: task.due_at,
                order: task.order,
            })
            .collect::<Vec<_>>();
        timers.sort_by_key(|timer| (timer.due_at, timer.order));
        timers
    }

    pub fn advance_time(&mut self, delta_ms: i64) -> Result<()> {
        if delta_ms < 0 {
            return Err(Error::Runtime(
                "advance_time requires non-negative milliseconds".into(),
            ));
        }
        let from = self.scheduler.now_ms;
        self.scheduler.now_ms = from.saturating_add(delta_ms);
        let ran = self.run_timer_queue(Some(self.scheduler.now_ms), false)?;
        self.trace_timer_line(format!(
            "[timer] advance delta_ms={} from={} to={} ran_due={}",
            delta_ms, from, self.scheduler.now_ms, ran
        ));
        Ok(())
    }

    pub fn advance_time_to(&mut self, target_ms: i64) -> Result<()> {
        if target_ms < self.scheduler.now_ms {
            return Err(Error::Runtime(format!(
                "advance_time_to requires target >= now_ms (target={target_ms}, now_ms={})",
                self.scheduler.now_ms
            )));
        }
        let from = self.scheduler.now_ms;
        self.scheduler.now_ms = target_ms;
        let ran = self.run_timer_queue(Some(target_ms), false)?;
        self.trace_timer_line(format!(
            "[timer] advance_to from={} to={} ran_due={}",
            from, self.scheduler.now_ms, ran
        ));
        Ok(())
    }

    /// Runs every queued timer, moving the clock forward as needed.
    pub fn flush(&mut self) -> Result<()> {
        let from = self.scheduler.now_ms;
        let ran = self.run_timer_queue(None, true)?;
        self.trace_timer_line(format!(
            "[timer] flush from={} to={} ran={}",
            from, self.scheduler.now_ms, ran
        ));
        Ok(())
    }

    pub fn run_due_timers(&mut self) -> Result<usize> {
        let ran = self.run_timer_queue(Some(self.scheduler.now_ms), false)?;
        self.trace_timer_line(format!(
            "[timer] run_due now_ms={} ran={}",
            self.scheduler.now_ms, ran
        ));
        Ok(ran)
    }

    fn run_timer_queue(&mut self, due_limit: Option<i64>, advance_clock: bool) -> Result<usize> {
        let mut steps = 0usize;
        while let Some(next_idx) = self.scheduler.next_task_index(due_limit) {
            steps += 1;
            if steps > self.scheduler.timer_step_limit {
                return Err(self.timer_step_limit_error(steps, due_limit));
            }
            let task = self.scheduler.task_queue.remove(next_idx);
            if advance_clock && task.due_at > self.scheduler.now_ms {
                self.scheduler.now_ms = task.due_at;
            }
            self.trace_timer_line(format!(
                "[timer] run id={} due_at={} now_ms={}",
                task.id, task.due_at, self.scheduler.now_ms
            ));
            self.execute_timer_task(task.task)?;
        }
        Ok(steps)
    }

    fn execute_timer_task(&mut self, task: TimerTask) -> Result<()> {
        match task {
            TimerTask::RemoveNode(node) => self.dom.remove_node(node),
        }
    }

    fn timer_step_limit_error(&self, steps: usize, due_limit: Option<i64>) -> Error {
        let due_limit_desc = due_limit
            .map(|value| value.to_string())
            .unwrap_or_else(|| "none".into());
        Error::Runtime(format!(
            "timer queue exceeded max task steps: limit={}, steps={steps}, now_ms={}, due_limit={}, pending_tasks={}",
            self.scheduler.timer_step_limit,
            self.scheduler.now_ms,
            due_limit_desc,
            self.scheduler.task_queue.len()
        ))
    }
}
