use std::time::Duration;

use models::v1::ForceType;

use crate::EncounterResult;

#[derive(Debug, Clone)]
pub struct EncounterSummary {
    pub total_runs: usize,
    pub cleared: usize,
    pub timeouts: usize,
    pub average_duration: Duration,
    pub average_ticks: f32,
    pub average_survivors: f32,
    /// Average remaining amount per force, in declaration order.
    pub average_resources: Vec<(ForceType, f32)>,
}

impl From<&Vec<EncounterResult>> for EncounterSummary {
    fn from(results: &Vec<EncounterResult>) -> Self {
        let total_runs = results.len();
        let mut cleared = 0;
        let mut timeouts = 0;
        let mut sum_duration = Duration::ZERO;
        let mut sum_ticks = 0f64;
        let mut sum_survivors = 0f64;
        let mut sum_resources = [0f64; 5];

        for res in results.iter() {
            match res {
                EncounterResult::Cleared(..) => cleared += 1,
                EncounterResult::Timeout(..) => timeouts += 1,
            }
            let inner = res.inner_ref();
            sum_duration += inner.duration;
            sum_ticks += inner.ticks.0 as f64;
            sum_survivors += inner.survivors.len() as f64;
            for force in ForceType::ALL {
                sum_resources[force.index()] += inner.resources.amount(force) as f64;
            }
        }

        let average = |sum: f64| match total_runs {
            0 => 0.0,
            n => (sum / n as f64) as f32,
        };

        let average_duration = if total_runs > 0 {
            sum_duration / (total_runs as u32)
        } else {
            Duration::ZERO
        };

        EncounterSummary {
            total_runs,
            cleared,
            timeouts,
            average_duration,
            average_ticks: average(sum_ticks),
            average_survivors: average(sum_survivors),
            average_resources: ForceType::ALL
                .into_iter()
                .map(|force| (force, average(sum_resources[force.index()])))
                .collect(),
        }
    }
}

impl std::fmt::Display for EncounterSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} run(s): {} cleared, {} timed out",
            self.total_runs, self.cleared, self.timeouts
        )?;
        writeln!(
            f,
            "average {:?} per run, {:.1} ticks, {:.2} survivor(s)",
            self.average_duration, self.average_ticks, self.average_survivors
        )?;
        let resources = self
            .average_resources
            .iter()
            .map(|(force, amount)| format!("{force}={amount:.1}"))
            .collect::<Vec<_>>();
        write!(f, "average resources: {}", resources.join(", "))
    }
}
