/// Fire-and-forget sink for one bus topic.
///
/// Implementations must not block meaningfully, a slow subscriber is the bus's business.
pub trait Publisher<T> {
    fn publish(&mut self, message: &T);
}
