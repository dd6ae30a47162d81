/// Validates the state of a command or a configuration before it is used.
pub trait Validatable<E> {
    fn validate(&self) -> Result<(), E>;
}
