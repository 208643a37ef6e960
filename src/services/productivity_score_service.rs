use tracing::debug;

use crate::models::productivity::ProductivitySummary;
use crate::models::task::{TaskRecord, UserRef};

const MILLIS_PER_DAY: f64 = 86_400_000.0;
/// Lateness is measured against this many days; credit is kept in
/// thirtieths of a weight unit so sums stay exact.
const LATENESS_HORIZON_DAYS: u64 = 30;
/// Penalty caps at half the weight, reached after this many days.
const MAX_PENALTY_DAYS: u64 = LATENESS_HORIZON_DAYS / 2;
/// Blend weights, in tenths.
const ON_TIME_RATE_WEIGHT: u64 = 6;
const WEIGHTED_SCORE_WEIGHT: u64 = 4;

/// How a completed task's dates place it relative to its deadline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompletionTiming {
    /// Due date or completion date missing; full credit, not counted.
    Undated,
    OnTime { days_early: i64 },
    Late { days_late: i64 },
}

/// Scoring contribution of one completed task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskContribution {
    pub weight: u32,
    /// Credit in thirtieths of a weight unit.
    pub credit_thirtieths: u64,
    pub timing: CompletionTiming,
}

impl TaskContribution {
    pub fn credit(&self) -> f64 {
        self.credit_thirtieths as f64 / LATENESS_HORIZON_DAYS as f64
    }
}

/// Lateness penalty in thirtieths of the task weight, capped at one half.
pub fn lateness_penalty_thirtieths(days_late: i64) -> u64 {
    (days_late.max(0) as u64).min(MAX_PENALTY_DAYS)
}

pub fn task_contribution(task: &TaskRecord) -> TaskContribution {
    let weight = task.weight();
    let full = u64::from(weight) * LATENESS_HORIZON_DAYS;

    let (due, completed) = match (task.due_date, task.completion_date) {
        (Some(due), Some(completed)) => (due, completed),
        _ => {
            return TaskContribution {
                weight,
                credit_thirtieths: full,
                timing: CompletionTiming::Undated,
            }
        }
    };

    let elapsed_ms = (completed - due).num_milliseconds() as f64;
    let days_diff = (elapsed_ms / MILLIS_PER_DAY).ceil() as i64;

    if days_diff <= 0 {
        TaskContribution {
            weight,
            credit_thirtieths: full,
            timing: CompletionTiming::OnTime {
                days_early: days_diff.abs(),
            },
        }
    } else {
        TaskContribution {
            weight,
            credit_thirtieths: u64::from(weight)
                * (LATENESS_HORIZON_DAYS - lateness_penalty_thirtieths(days_diff)),
            timing: CompletionTiming::Late {
                days_late: days_diff,
            },
        }
    }
}

/// `round(numerator / denominator * 100)`, half away from zero, on integers.
fn round_percent(numerator: u64, denominator: u64) -> u32 {
    if denominator == 0 {
        return 0;
    }
    ((numerator * 200 + denominator) / (denominator * 2)) as u32
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[derive(Debug, Default)]
struct TimelinessTally {
    completed: u32,
    on_time: u32,
    overdue: u32,
    early_days: i64,
    late_days: i64,
    credit_thirtieths: u64,
    total_weight: u64,
}

impl TimelinessTally {
    fn add(&mut self, contribution: TaskContribution) {
        self.completed += 1;
        match contribution.timing {
            CompletionTiming::Undated => {}
            CompletionTiming::OnTime { days_early } => {
                self.on_time += 1;
                self.early_days += days_early;
            }
            CompletionTiming::Late { days_late } => {
                self.overdue += 1;
                self.late_days += days_late;
            }
        }
        self.credit_thirtieths += contribution.credit_thirtieths;
        self.total_weight += u64::from(contribution.weight);
    }

    fn on_time_rate(&self) -> u32 {
        round_percent(u64::from(self.on_time), u64::from(self.completed))
    }

    fn weighted_score(&self) -> u32 {
        round_percent(
            self.credit_thirtieths,
            self.total_weight * LATENESS_HORIZON_DAYS,
        )
    }

    fn average_days_on_time(&self) -> f64 {
        if self.on_time == 0 {
            return 0.0;
        }
        round_one_decimal(self.early_days as f64 / f64::from(self.on_time))
    }

    fn average_days_overdue(&self) -> f64 {
        if self.overdue == 0 {
            return 0.0;
        }
        round_one_decimal(self.late_days as f64 / f64::from(self.overdue))
    }
}

/// Blends the on-time rate (60%) with the weighted timeliness score (40%).
pub fn blend_productivity_score(on_time_rate: u32, weighted_score: u32) -> u32 {
    let tenths = u64::from(on_time_rate) * ON_TIME_RATE_WEIGHT
        + u64::from(weighted_score) * WEIGHTED_SCORE_WEIGHT;
    ((tenths + 5) / 10) as u32
}

/// Scores one member's completed tasks on timeliness, weighting each task by
/// priority and difficulty. Depends only on the dates stored in the tasks.
pub fn compute_productivity(
    user_id: &str,
    user_name: &str,
    tasks: &[TaskRecord],
) -> ProductivitySummary {
    let mut tally = TimelinessTally::default();

    for task in tasks
        .iter()
        .filter(|task| task.is_assigned_to(user_id) && task.status.is_completed())
    {
        tally.add(task_contribution(task));
    }

    if tally.completed == 0 {
        return ProductivitySummary::zeroed(user_id, user_name);
    }

    let on_time_completion_rate = tally.on_time_rate();
    let weighted_score = tally.weighted_score();
    let productivity_score = blend_productivity_score(on_time_completion_rate, weighted_score);

    debug!(
        target: "app::scoring",
        user_id,
        completed = tally.completed,
        on_time = tally.on_time,
        overdue = tally.overdue,
        productivity_score,
        "productivity computed"
    );

    ProductivitySummary {
        user_id: user_id.to_string(),
        user_name: user_name.to_string(),
        productivity_score,
        on_time_completion_rate,
        average_days_on_time: tally.average_days_on_time(),
        average_days_overdue: tally.average_days_overdue(),
        completed_on_time: tally.on_time,
        completed_overdue: tally.overdue,
        total_completed: tally.completed,
        weighted_score,
    }
}

/// One summary per roster entry, in roster order.
pub fn compute_all_productivity(
    users: &[UserRef],
    tasks: &[TaskRecord],
) -> Vec<ProductivitySummary> {
    users
        .iter()
        .map(|user| compute_productivity(&user.id, &user.display_name, tasks))
        .collect()
}
