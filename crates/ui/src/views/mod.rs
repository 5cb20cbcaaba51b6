mod components;
mod landing;
mod login;
mod menu;
mod plan_create;
mod plan_edit;
mod plan_form;
mod plans;
mod profile;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use components::{ConfirmDialog, ErrorBanner, Toast};
pub use landing::LandingView;
pub use login::LoginView;
pub use menu::MenuView;
pub use plan_create::PlanCreateView;
pub use plan_edit::PlanEditView;
pub use plan_form::PlanForm;
pub use plans::PlansView;
pub use profile::ProfileView;
pub use state::{ViewError, ViewState, view_state_from_resource};
