/// Fixed-size worker pool fed by a bounded channel.
///
/// The calling thread pushes jobs into the channel while `workers` scoped
/// threads drain it, one job per receive. There is no ordering guarantee
/// between jobs. The call returns once every job has been handled.
use crossbeam_channel::bounded;
use std::thread;

/// Jobs that may queue up per worker before the feeder blocks.
const QUEUE_DEPTH_PER_WORKER: usize = 2;

pub fn run_pool<T, F>(jobs: Vec<T>, workers: usize, handle: F)
where
    T: Send,
    F: Fn(T) + Sync,
{
    let workers = workers.max(1).min(jobs.len().max(1));
    let (job_tx, job_rx) = bounded::<T>(workers * QUEUE_DEPTH_PER_WORKER);
    let handle = &handle;

    thread::scope(|s| {
        for i in 0..workers {
            let job_rx = job_rx.clone();
            thread::Builder::new()
                .name(format!("rias-worker-{i}"))
                .spawn_scoped(s, move || {
                    for job in job_rx {
                        handle(job);
                    }
                })
                .expect("failed to spawn worker thread");
        }
        drop(job_rx);

        for job in jobs {
            if job_tx.send(job).is_err() {
                break;
            }
        }
        drop(job_tx);
    });
}
