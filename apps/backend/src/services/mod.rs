pub mod classrooms;
pub mod scores;

pub use classrooms::ClassroomService;
pub use scores::ScoreService;
