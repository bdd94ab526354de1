use std::{error, fmt, io, result};

pub type Result<T> = result::Result<T, FlowScriptError>;

#[derive(Debug)]
pub enum FlowScriptError {
    CapacityExceeded,
    InvalidLink,
    InvalidNodeId,
    InvalidSlotId,
    NodeIdTaken,
    Io(io::Error),
}

impl fmt::Display for FlowScriptError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FlowScriptError::CapacityExceeded => f.write_str("Table or link list is full"),
            FlowScriptError::InvalidLink => f.write_str("No such flow link"),
            FlowScriptError::InvalidNodeId => f.write_str("Invalid `NodeId`"),
            FlowScriptError::InvalidSlotId => f.write_str("Invalid `SlotId`"),
            FlowScriptError::NodeIdTaken => f.write_str("`NodeId` is already in use"),
            FlowScriptError::Io(e) => write!(f, "Io: {}", e),
        }
    }
}

impl error::Error for FlowScriptError {}

impl From<io::Error> for FlowScriptError {
    fn from(cause: io::Error) -> FlowScriptError {
        FlowScriptError::Io(cause)
    }
}
