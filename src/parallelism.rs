use crossbeam_channel::TryRecvError;
use log::trace;
use std::thread;

/// Apply `f` to each item using all CPUs.
/// The results are in the same order as the items.
pub fn map_parallel<T, R, F>(items: &[T], f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync,
{
    let (s1, r1) = crossbeam_channel::unbounded();
    for job in 0..items.len() {
        s1.send(job).expect("job queue is open");
    }
    drop(s1);
    let nthreads = num_cpus::get().min(items.len()).max(1);
    let mut results: Vec<Option<R>> = (0..items.len()).map(|_| None).collect();
    trace!(target: "words750", "{} jobs, {nthreads} threads", items.len());
    thread::scope(|scope| {
        let (s2, r2) = crossbeam_channel::unbounded();
        for _ in 0..nthreads {
            let r1 = r1.clone();
            let s2 = s2.clone();
            let f = &f;
            scope.spawn(move || {
                loop {
                    match r1.try_recv() {
                        Ok(job) => {
                            s2.send((job, f(&items[job])))
                                .expect("result queue is open");
                        }
                        Err(TryRecvError::Empty) => unreachable!(),
                        Err(TryRecvError::Disconnected) => break,
                    }
                }
            });
        }
        drop(s2);
        while let Ok((job, result)) = r2.recv() {
            results[job] = Some(result);
        }
    });
    results
        .into_iter()
        .map(|r| r.expect("every job was run"))
        .collect()
}
