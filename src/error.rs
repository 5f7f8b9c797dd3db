/// Fatal errors that abort a run before any event is emitted.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Filter(#[from] crate::filter::Error),
    #[error("failed to read declared mounts: {0}")]
    Fstab(#[from] crate::fstab::Error),
    #[error("failed to read active mounts: {0}")]
    MountInfo(#[from] crate::mountinfo::Error),
    #[error(transparent)]
    Event(#[from] crate::event::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

pub trait ResultOkLogExt<T, E> {
    fn ok_log(self) -> Option<T>;
}

impl<T, E> ResultOkLogExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error,
{
    fn ok_log(self) -> Option<T> {
        match self {
            Ok(ok) => Some(ok),
            Err(err) => {
                log::error!("{err}");
                None
            }
        }
    }
}
