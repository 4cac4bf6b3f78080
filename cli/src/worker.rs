use rand::{SeedableRng, rngs::StdRng};
use simulator::{DispatchableEvent, Encounter, EncounterResult};

/// Runs one seeded encounter per entry of `seeds` on a new thread, sending
/// `(run index, result)` back as each one finishes.
pub fn spawn_run_encounter_thread(
    seeds: Vec<(usize, u64)>,
    encounter: Encounter,
    thread_res_tx: std::sync::mpsc::Sender<(usize, EncounterResult)>,
    thread_evt_tx: Option<std::sync::mpsc::Sender<DispatchableEvent>>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        let encounter = match thread_evt_tx {
            Some(tx) => encounter.with_channel(tx),
            None => encounter,
        };
        for (index, seed) in seeds {
            let result = encounter.run_once_with_rng(StdRng::seed_from_u64(seed));
            if let Err(error) = thread_res_tx.send((index, result)) {
                tracing::error!(?error, "error sending encounter result");
                break;
            }
        }
    })
}
