mod menu_vm;
mod plan_vm;
mod profile_vm;
mod time_fmt;

pub use menu_vm::{MenuItemVm, MenuTarget, menu_items};
pub use plan_vm::{PlanRowVm, map_plan_rows};
pub use profile_vm::{
    CarreraVm, MateriaChipVm, carrera_options, map_carreras, materia_options,
};
pub use time_fmt::{format_long_date, format_short_date};
