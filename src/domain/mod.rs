pub mod record;
pub mod technician;
pub mod ticket;
pub mod workload;
