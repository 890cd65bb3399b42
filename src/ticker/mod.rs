use crate::repository::{Record, RepositoryProvider};
use crate::settings::Setup;
use chrono::{DateTime, Local, TimeZone};
use std::time::Duration;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{error, info};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Report describes the outcome of a single tick.
///
#[derive(Debug, Clone)]
pub struct Report {
    pub counter: u64,
    pub message: String,
    pub inserted: bool,
    pub total: Option<i64>,
    pub recent: Option<Vec<Record>>,
}

impl Report {
    /// Returns console lines for this tick. A failed insert or count produces no lines.
    ///
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(total) = self.total {
            lines.push(format!(
                "✓ Added record: {} (total records: {})",
                self.message, total
            ));
        }
        if let Some(recent) = self.recent.as_ref() {
            lines.push("Recent records:".to_string());
            for rec in recent {
                lines.push(format!(
                    "  - ID: {}, Message: {}, Time: {}",
                    rec.id,
                    rec.message,
                    rec.timestamp.with_timezone(&Local).format(TIME_FORMAT)
                ));
            }
            lines.push(String::new());
        }
        lines
    }

    pub fn print(&self) {
        for line in self.lines() {
            println!("{}", line);
        }
    }
}

/// Ticker periodically writes a numbered entry and reports on the stored records.
///
pub struct Ticker<T>
where
    T: RepositoryProvider,
{
    repo: T,
    counter: u64,
    interval: Duration,
    report_every: u64,
    recent_limit: i64,
}

impl<T> Ticker<T>
where
    T: RepositoryProvider,
{
    pub fn new(repo: T, setup: &Setup) -> Self {
        Self {
            repo,
            counter: 1,
            interval: setup.get_interval(),
            report_every: setup.get_report_every(),
            recent_limit: setup.get_recent_limit(),
        }
    }

    /// Number the next tick will use.
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Builds the entry text, like `Entry #7 - 2024-05-01 12:00:05`.
    ///
    pub fn message<Tz>(counter: u64, now: DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        format!("Entry #{} - {}", counter, now.format(TIME_FORMAT))
    }

    /// Processes one tick: insert, count, and every `report_every` ticks read the newest records.
    /// Failures are logged and never stop the ticker. The counter advances even when the insert fails.
    ///
    pub async fn tick(&mut self) -> Report {
        let counter = self.counter;
        self.counter += 1;

        let mut report = Report {
            counter,
            message: Self::message(counter, Local::now()),
            inserted: false,
            total: None,
            recent: None,
        };
        info!("{}", report.message);

        if let Err(e) = self.repo.insert_record(&report.message).await {
            error!(counter, error = %e, "insert failed");
            return report;
        }
        report.inserted = true;

        match self.repo.count_records().await {
            Ok(total) => report.total = Some(total),
            Err(e) => error!(counter, error = %e, "count failed"),
        }

        if self.report_every != 0 && counter % self.report_every == 0 {
            match self.repo.recent_records(self.recent_limit).await {
                Ok(recent) => report.recent = Some(recent),
                Err(e) => error!(counter, error = %e, "reading recent records failed"),
            }
        }

        report
    }

    /// Ticks forever. The first tick fires one interval after the call; overrun ticks are skipped.
    ///
    pub async fn run(&mut self) {
        let mut interval = time::interval_at(Instant::now() + self.interval, self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            interval.tick().await;
            self.tick().await.print();
        }
    }
}
