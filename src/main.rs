use clap::{Parser, ValueEnum};
use rand::prelude::*;
use schedsim::{
    FcfsScheduler, InputError, Job, MlfqScheduler, RoundRobinScheduler, Schedule, Sim,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Algorithm {
    Fcfs,
    Rr,
    Mlfq,
}

#[derive(Parser)]
#[command(version, about = "Simulate a scheduling discipline over a random batch of processes")]
struct Cli {
    /// Scheduling discipline to simulate
    #[arg(value_enum)]
    algorithm: Algorithm,

    /// Time quantum for the preemptive tiers (rr, mlfq)
    #[arg(long, default_value_t = 2)]
    quantum: u64,

    /// Number of processes in the generated batch
    #[arg(long, default_value_t = 8)]
    jobs: usize,

    /// Largest burst time in the generated workload
    #[arg(long, default_value_t = 9)]
    max_burst: u64,

    /// Arrival probability per tick
    #[arg(long, default_value_t = 0.4)]
    p_arrival: f64,

    /// Workload RNG seed
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> Result<(), InputError> {
    env_logger::init();
    let cli = Cli::parse();

    let jobs = bernoulli_jobs(cli.jobs, cli.p_arrival, cli.max_burst, cli.seed);

    let schedule = match cli.algorithm {
        Algorithm::Fcfs => Sim::new(&jobs, FcfsScheduler::new())?.run(),
        Algorithm::Rr => Sim::new(&jobs, RoundRobinScheduler::new(cli.quantum)?)?.run(),
        Algorithm::Mlfq => Sim::new(&jobs, MlfqScheduler::new(cli.quantum)?)?.run(),
    };

    print_schedule(&schedule);
    Ok(())
}

/// Bernoulli arrivals: each tick brings a process with probability
/// `p_arrival`, with a uniform burst, until the batch is full.
fn bernoulli_jobs(count: usize, p_arrival: f64, max_burst: u64, seed: u64) -> Vec<Job> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut jobs = Vec::with_capacity(count);

    let mut t = 0;
    while jobs.len() < count {
        if rng.random::<f64>() < p_arrival {
            jobs.push(Job {
                id: jobs.len() as u32 + 1,
                arrival_time: t,
                burst_time: rng.random_range(1..=max_burst.max(1)),
            });
        }
        t += 1;
    }

    jobs
}

fn print_schedule(schedule: &Schedule) {
    println!("Gantt chart:");
    for segment in &schedule.timeline {
        match segment.tier {
            Some(tier) => print!(
                "| P{} {}..{} ({tier}) ",
                segment.id, segment.start, segment.end
            ),
            None => print!("| P{} {}..{} ", segment.id, segment.start, segment.end),
        }
    }
    println!("|");

    println!();
    println!(
        "{:>5} {:>8} {:>6} {:>8} {:>11} {:>11}",
        "proc", "arrival", "burst", "waiting", "turnaround", "completion"
    );
    for o in &schedule.outcomes {
        println!(
            "{:>5} {:>8} {:>6} {:>8} {:>11} {:>11}",
            format!("P{}", o.id),
            o.arrival_time,
            o.burst_time,
            o.waiting_time,
            o.turnaround_time,
            o.completion_time
        );
    }

    println!();
    println!(
        "Average waiting time:    {:.2} ticks",
        schedule.metrics.avg_waiting_time
    );
    println!(
        "Average turnaround time: {:.2} ticks",
        schedule.metrics.avg_turnaround_time
    );
    println!(
        "Throughput:              {:.2} processes per tick",
        schedule.metrics.throughput
    );
}
