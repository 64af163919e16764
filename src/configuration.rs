pub trait Configuration: Clone + Send + Sync + 'static {
    fn port(&self) -> u16;
    fn database_url(&self) -> Option<String>;
    /// Only clients linked to a trainer may book that trainer's slots.
    fn enforce_client_relationship(&self) -> bool;
    fn example_data(&self) -> bool;
}
