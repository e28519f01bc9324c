pub mod dispatch;
pub mod encode_video;
pub mod form;
pub mod predict;
pub mod schema;
