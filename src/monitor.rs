
use std::{fmt, future::Future};

use uuid::Uuid;

use crate::{config::TimerConfig, error::TimerResult, timer::Timer};

/// Something produced by `FunctionMonitor` around a callable.
pub trait Monitored {
    /// Name used as the prefix of every generated timer id.
    fn name(&self) -> &str;
}

/// Wraps callables so each invocation is measured by a fresh `Timer`.
///
/// Whether a wrapper is synchronous or awaitable is decided by the
/// constructor used, `wrap` or `wrap_async`, never at call time.
#[derive(Debug, Clone, Default)]
pub struct FunctionMonitor {
    config: TimerConfig,
}

impl FunctionMonitor {
    pub fn new(config: TimerConfig) -> TimerResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn wrap<S: ToString, F>(&self, name: S, function: F) -> SyncWrapper<F> {
        SyncWrapper {
            name: name.to_string(),
            config: self.config.clone(),
            function,
        }
    }

    pub fn wrap_async<S: ToString, F>(&self, name: S, function: F) -> AsyncWrapper<F> {
        AsyncWrapper {
            name: name.to_string(),
            config: self.config.clone(),
            function,
        }
    }

    /// `wrap` named after the function item, e.g. `parse_header`.
    /// Closures all come out as `{{closure}}`, use `wrap` for them.
    pub fn wrap_fn<F>(&self, function: F) -> SyncWrapper<F> {
        self.wrap(callable_name::<F>(), function)
    }

    /// `wrap_async` named after the function item.
    pub fn wrap_async_fn<F>(&self, function: F) -> AsyncWrapper<F> {
        self.wrap_async(callable_name::<F>(), function)
    }
}

/// Last path segment of the type name, generics dropped.
fn callable_name<F>() -> &'static str {
    let full = std::any::type_name::<F>();
    let path = full.split('<').next().unwrap_or(full);
    path.rsplit("::").next().unwrap_or(path)
}

/// Timer id for one invocation, unique even under recursion or concurrency.
fn unique_timer_id(name: &str) -> String {
    format!("{name} - {}", Uuid::new_v4().simple())
}

#[derive(Clone)]
pub struct SyncWrapper<F> {
    name: String,
    config: TimerConfig,
    function: F,
}

impl<F> SyncWrapper<F> {
    /// Call the wrapped function with `args`, several arguments go in a tuple.
    ///
    /// A panic in the wrapped function unwinds past `stop`.
    pub fn call<A, R>(&self, args: A) -> TimerResult<R>
    where
        F: Fn(A) -> R,
    {
        let timer_id = unique_timer_id(&self.name);
        let mut timer = Timer::new(self.config.clone())?;

        timer.start(&timer_id)?;
        let output = (self.function)(args);
        timer.stop(&timer_id)?;

        Ok(output)
    }
}

impl<F> Monitored for SyncWrapper<F> {
    fn name(&self) -> &str {
        &self.name
    }
}

impl<F> fmt::Debug for SyncWrapper<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncWrapper").field("name", &self.name).finish()
    }
}

#[derive(Clone)]
pub struct AsyncWrapper<F> {
    name: String,
    config: TimerConfig,
    function: F,
}

impl<F> AsyncWrapper<F> {
    /// Call the wrapped function and await the future it returns before
    /// stopping the timer.
    pub async fn call<A, Fut>(&self, args: A) -> TimerResult<Fut::Output>
    where
        F: Fn(A) -> Fut,
        Fut: Future,
    {
        let timer_id = unique_timer_id(&self.name);
        let mut timer = Timer::new(self.config.clone())?;

        timer.start(&timer_id)?;
        let output = (self.function)(args).await;
        timer.stop(&timer_id)?;

        Ok(output)
    }
}

impl<F> Monitored for AsyncWrapper<F> {
    fn name(&self) -> &str {
        &self.name
    }
}

impl<F> fmt::Debug for AsyncWrapper<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncWrapper").field("name", &self.name).finish()
    }
}
