/// Default number of pool workers (units of work allowed to run at once)
pub const DEFAULT_MAX_WORKERS: usize = 4;
/// Name given to the threads of a pool-owned runtime
pub const DEFAULT_THREAD_NAME: &str = "hades-worker";
/// How long `WorkerPool::shutdown` waits for running work
pub const DEFAULT_SHUTDOWN_TIMEOUT_MS: u64 = 5_000;
/// How often interruptible components check their stop signal
pub const STOP_POLL_INTERVAL_MS: u64 = 10;
/// Default iteration budget for a `loop` stage
pub const DEFAULT_MAX_ITER: usize = 100;
/// Default number of unchanged iterations after which a `loop` stage ends
pub const DEFAULT_CONVERGENCE: usize = 10;
