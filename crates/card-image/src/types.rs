use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Not a valid image: \"{}\"", .0.display())]
    NotAnImage(PathBuf),
    #[error("Invalid bleed: {0}")]
    InvalidBleed(String),
    #[error("Image has no pixels")]
    Empty,
    #[error(transparent)]
    Layout(#[from] card_layout::LayoutError),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, ImageError>;
