mod check;
mod crew;
mod init;
mod roster;

pub use check::cmd_check;
pub use crew::cmd_assign_crew;
pub use init::cmd_init;
pub use roster::{cmd_list_kameraden, cmd_list_vehicles, cmd_seed_kameraden};
