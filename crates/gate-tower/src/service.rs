use tower::Service;

/// Takes the ready service out of `src`, leaving a fresh clone in its place.
///
/// A clone of a [`Service`] is not guaranteed to be ready, so the instance that
/// was polled must be the one that gets called.
pub fn replace_ready_service<S, T>(src: &mut S) -> S
where
    S: Service<T> + Clone,
{
    let clone = src.clone();
    std::mem::replace(src, clone)
}
