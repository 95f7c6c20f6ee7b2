mod error;
mod image;
mod progress;
