#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("catalog error: {0}")]
    Catalog(#[from] medvida_catalog::CatalogError),
    #[error("unknown page: {0}")]
    UnknownPage(String),
    #[error("doctor {0} is not listed on this page")]
    DoctorNotListed(String),
    #[error("specialty {0} is not offered")]
    SpecialtyNotOffered(String),
    #[error("day {0} is not on the booking calendar")]
    DayUnavailable(u32),
    #[error("slot {0} is not offered")]
    SlotUnavailable(String),
    #[error("session has ended")]
    SessionClosed,
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
