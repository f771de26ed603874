//! Server-rendered pages: the four tabs and the PDF viewer.

mod handler;
mod routes;

pub use handler::DOCUMENT_NOT_FOUND;
pub use routes::routes;
