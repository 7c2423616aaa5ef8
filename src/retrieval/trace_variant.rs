/// The whole activity sequence is the single species of a trace.
pub fn trace_variant<O, A>() -> impl Fn(&O) -> Vec<Vec<A>> + Clone + Send + Sync + 'static
where
    O: AsRef<[A]> + 'static,
    A: Clone + 'static,
{
    |trace: &O| vec![trace.as_ref().to_vec()]
}
