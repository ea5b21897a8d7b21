//! Eviction policies.
//!
//! | Policy | Store                 | Evicts                                   |
//! |--------|-----------------------|------------------------------------------|
//! | FIFO   | [`fifo::FifoStore`]   | least recently inserted or updated entry |
//! | LFU    | [`lfu::LfuStore`]     | lowest weight, oldest among equals       |

pub mod fifo;
pub mod lfu;
