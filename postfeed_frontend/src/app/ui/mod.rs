pub mod comments;
pub mod feed;
pub mod post;
pub mod skeleton;
