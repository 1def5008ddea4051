use console::{style, Term};
use std::time::Instant;

pub struct TaskRunner {
    term: Term,
    num_tasks: u32,
    current_task: u32,
    now: Instant,
    descr: String,
    started: bool,
}

impl TaskRunner {
    pub fn new(num_tasks: u32) -> Self {
        Self {
            term: Term::stdout(),
            num_tasks,
            current_task: 0,
            now: Instant::now(),
            descr: "".into(),
            started: false,
        }
    }

    fn task_id(&self) -> String {
        style(format!("[{}/{}]", self.current_task + 1, self.num_tasks))
            .force_styling(true)
            .to_string()
    }

    pub fn start_task(&mut self, descr: impl Into<String>) {
        self.now = Instant::now();
        self.descr = descr.into();
        self.started = true;
        println!("{} {}", self.task_id(), &self.descr);
    }

    pub fn skip_task(&mut self, descr: impl Into<String>) {
        self.descr = descr.into();
        println!("{} {} [SKIPPED]", self.task_id(), &self.descr);
        self.current_task += 1;
        self.started = false;
    }

    pub fn end_task(&mut self) {
        if !self.started {
            return;
        }
        self.started = false;
        self.term.clear_last_lines(1).ok();
        let time = self.now.elapsed();
        println!(
            "{} {} [{}ms]",
            self.task_id(),
            &self.descr,
            time.as_millis()
        );
        self.current_task += 1;
    }
}
