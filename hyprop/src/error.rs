use thiserror::Error;

#[derive(Debug, Error)]
pub enum PropError {
    #[error(
        "Property kinds '{first}' and '{second}' share the fingerprint {fingerprint:#018x}"
    )]
    KindCollision {
        first: &'static str,
        second: &'static str,
        fingerprint: u64,
    },

    #[error("No property kind registered under '{0}'")]
    KindNotFound(String),
}

pub type PropResult<T> = Result<T, PropError>;
