use average::{Estimate, Mean};

use super::job::JobOutcome;

/// Aggregate figures over one finished batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub avg_waiting_time: f64,
    pub avg_turnaround_time: f64,
    /// Processes finished per tick, measured against the last finish.
    pub throughput: f64,
}

pub fn summarize(outcomes: &[JobOutcome]) -> Metrics {
    debug_assert!(!outcomes.is_empty(), "metrics over an empty batch");

    let avg_waiting_time = outcomes
        .iter()
        .map(|o| o.waiting_time as f64)
        .collect::<Mean>()
        .estimate();
    let avg_turnaround_time = outcomes
        .iter()
        .map(|o| o.turnaround_time as f64)
        .collect::<Mean>()
        .estimate();

    // Chronologically last finish, independent of row order.
    let makespan = outcomes
        .iter()
        .map(|o| o.completion_time)
        .max()
        .expect("non-empty batch has a last completion");

    Metrics {
        avg_waiting_time,
        avg_turnaround_time,
        throughput: outcomes.len() as f64 / makespan as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(id: u32, arrival: u64, burst: u64, completion: u64) -> JobOutcome {
        let turnaround = completion - arrival;
        JobOutcome {
            id,
            arrival_time: arrival,
            burst_time: burst,
            waiting_time: turnaround - burst,
            turnaround_time: turnaround,
            completion_time: completion,
        }
    }

    #[test]
    fn averages_match_hand_computation() {
        // FCFS over P1(0,5) P2(1,3) P3(2,1).
        let rows = [outcome(1, 0, 5, 5), outcome(2, 1, 3, 8), outcome(3, 2, 1, 9)];
        let metrics = summarize(&rows);

        assert!((metrics.avg_waiting_time - 10.0 / 3.0).abs() < 1e-9);
        assert!((metrics.avg_turnaround_time - 19.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn throughput_uses_the_last_finish() {
        // Rows deliberately ordered so the last-finishing process is first.
        let rows = [outcome(2, 0, 8, 10), outcome(1, 0, 2, 2)];
        let metrics = summarize(&rows);

        assert!((metrics.throughput - 2.0 / 10.0).abs() < 1e-9);
    }

    #[test]
    fn single_process_batch() {
        let rows = [outcome(1, 3, 4, 7)];
        let metrics = summarize(&rows);

        assert_eq!(metrics.avg_waiting_time, 0.0);
        assert_eq!(metrics.avg_turnaround_time, 4.0);
        assert!((metrics.throughput - 1.0 / 7.0).abs() < 1e-9);
    }
}
