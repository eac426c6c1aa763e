//! Consultation session lifecycle: repository port, bounded transcript,
//! slug generation, and the orchestrating service.

pub mod repository;
pub mod service;
pub mod slug;
pub mod transcript;

pub use repository::SessionRepository;
pub use service::SessionService;
pub use transcript::Transcript;
