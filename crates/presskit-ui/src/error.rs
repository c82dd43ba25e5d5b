use thiserror::Error;

use crate::region::{FilterId, RegionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegionTreeError {
    #[error("region {id} is not registered")]
    UnknownRegion { id: RegionId },
    #[error("filter {id:?} is not registered on region {region}")]
    UnknownFilter { region: RegionId, id: FilterId },
    #[error("the root region cannot be removed")]
    RootRemoval,
}
