//! Module implementing the actual image captioning.

mod bounds;
mod config;
mod error;
mod task;
mod text;

pub use self::config::Config;
pub use self::error::CaptionError;


use std::sync::{Arc, Mutex, TryLockError};
use std::time::Duration;

use atomic::{Atomic, Ordering};
use futures::{BoxFuture, Future, future};
use futures_cpupool::{self, CpuPool};
use tokio_timer::Timer;

use model::MemeRequest;
use self::task::CaptionTask;


/// Renders meme requests into captioned images.
pub struct Captioner {
    pool: Mutex<CpuPool>,
    timer: Timer,
    config: Config,
    // Configuration params.
    task_timeout: Atomic<Duration>,
}

impl Captioner {
    #[inline]
    fn new() -> Self {
        let pool = Mutex::new(Self::pool_builder().create());
        let timer = Timer::default();
        let config = Config::default();

        let task_timeout = Atomic::new(Duration::from_secs(0));

        Captioner{pool, timer, config, task_timeout}
    }

    #[inline]
    #[doc(hidden)]
    fn pool_builder() -> futures_cpupool::Builder {
        let mut builder = futures_cpupool::Builder::new();
        builder.name_prefix("caption-");
        builder.after_start(|| trace!("Worker thread created in Captioner::pool"));
        builder.before_stop(|| trace!("Stopping worker thread in Captioner::pool"));
        builder
    }
}

// Configuration tweaks.
impl Captioner {
    #[inline]
    pub fn set_thread_count(&self, count: usize) -> &Self {
        trace!("Setting thread count for image captioning to {}", count);

        let mut builder = Self::pool_builder();
        if count > 0 {
            builder.pool_size(count);
        }

        let pool = builder.create();
        *self.pool.lock().unwrap() = pool;
        self
    }

    #[inline]
    pub fn set_task_timeout(&self, timeout: Duration) -> &Self {
        let secs = timeout.as_secs();
        if secs > 0 {
            trace!("Setting meme request timeout to {} secs", secs);
        } else {
            trace!("Disabling meme request timeout");
        }
        self.task_timeout.store(timeout, Ordering::Relaxed);
        self
    }
}

// Rendering code.
impl Captioner {
    /// Render a meme request as PNG.
    /// The rendering is done in a separate thread.
    pub fn render(&self, request: MemeRequest) -> BoxFuture<Vec<u8>, CaptionError> {
        let pool = match self.pool.try_lock() {
            Ok(p) => p,
            Err(TryLockError::WouldBlock) => {
                // This should be only possible when set_thread_count() happens
                // to have been called at the exact same moment.
                warn!("Could not immediately lock CpuPool to render {:?}", request);
                // TODO: retry a few times, probably with exponential backoff
                return future::err(CaptionError::Unavailable).boxed();
            },
            Err(e) => {
                error!("Error while locking CpuPool for rendering {:?}: {}", request, e);
                return future::err(CaptionError::Unavailable).boxed();
            },
        };

        // Spawn a new task in the thread pool for the rendering process.
        let task_future = pool.spawn_fn({
            let request_repr = format!("{:?}", request);
            let task = CaptionTask{request, config: self.config};
            move || {
                match task.perform() {
                    Ok(bytes) => {
                        debug!("Successfully rendered {}, final image size: {} bytes",
                            request_repr, bytes.len());
                        future::ok(bytes)
                    },
                    Err(e) => {
                        error!("Failed to render meme {}: {}", request_repr, e);
                        future::err(e)
                    },
                }
            }
        });

        // Impose a timeout on the task.
        let max_duration = self.task_timeout.load(Ordering::Relaxed);
        if max_duration.as_secs() > 0 {
            self.timer.timeout(task_future, max_duration).boxed()
        } else {
            task_future.boxed()
        }
    }
}

lazy_static! {
    /// The singleton instance of Captioner.
    pub static ref CAPTIONER: Arc<Captioner> = Arc::new(Captioner::new());
}
