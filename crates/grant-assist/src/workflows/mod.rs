pub mod advisors;
pub mod applications;
pub mod assistant;
pub mod content;
pub mod grants;
