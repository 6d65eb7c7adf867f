use tracing::error;

/// Reports a broken internal invariant of a tree.
///
/// Those are never caused by misuse of the public API, only by bugs in the crate itself.
#[cold]
#[inline(never)]
#[track_caller]
pub(crate) fn tree_corrupted(msg: &str) -> ! {
    error!(reason = msg, "tree corruption detected");
    // The tree can no longer be trusted, so unwinders should not get to observe it
    abort_on_panic(|| panic!("tree corruption detected: {}", msg));
    unreachable!("abort_on_panic returned after a panic")
}

#[inline]
pub(crate) fn abort_on_panic<R>(f: impl FnOnce() -> R) -> R {
    #[cfg(feature = "unwind_safety")]
    {
        std::panic::catch_unwind(
            std::panic::AssertUnwindSafe(f)
        ).unwrap_or_else(|_| std::process::abort())
    }
    #[cfg(not(feature = "unwind_safety"))]
    {
        f()
    }
}
