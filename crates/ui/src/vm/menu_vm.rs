use planes_core::model::Role;

use crate::routes::Route;

#[derive(Clone, Debug, PartialEq)]
pub enum MenuTarget {
    Route(Route),
    Logout,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MenuItemVm {
    pub label: &'static str,
    pub target: MenuTarget,
}

/// Entries of the management menu. Reviewers do not get plan creation.
#[must_use]
pub fn menu_items(role: Role) -> Vec<MenuItemVm> {
    let mut items = vec![MenuItemVm {
        label: "Registrar Datos",
        target: MenuTarget::Route(Route::RegistrarDatos {}),
    }];
    if role.can_create_plans() {
        items.push(MenuItemVm {
            label: "Registrar Plan",
            target: MenuTarget::Route(Route::Form1 {}),
        });
    }
    items.push(MenuItemVm {
        label: "Ver Datos",
        target: MenuTarget::Route(Route::Datos {}),
    });
    items.push(MenuItemVm {
        label: "Salir",
        target: MenuTarget::Logout,
    });
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(role: Role) -> Vec<&'static str> {
        menu_items(role).into_iter().map(|item| item.label).collect()
    }

    #[test]
    fn docente_sees_every_entry() {
        assert_eq!(
            labels(Role::Docente),
            vec!["Registrar Datos", "Registrar Plan", "Ver Datos", "Salir"]
        );
    }

    #[test]
    fn verificador_cannot_register_plans() {
        assert_eq!(
            labels(Role::Verificador),
            vec!["Registrar Datos", "Ver Datos", "Salir"]
        );
    }
}
