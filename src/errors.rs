use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContextError {
    #[error("`{consumer}` must be used within `{provider}`")]
    MissingProvider {
        consumer: &'static str,
        provider: &'static str,
    },

    #[error("scope `{scope}` is claimed by more than one composed factory")]
    AmbiguousScope { scope: &'static str },
}
