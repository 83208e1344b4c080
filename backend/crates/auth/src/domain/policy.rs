//! Access Policy
//!
//! One table maps every operation of the service to the access it requires.
//! The HTTP layer evaluates it once per request, before the handler runs.

use kernel::id::UserId;

use crate::domain::value_object::user_role::UserRole;

/// Every externally reachable operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Operation {
    DummyLogin,
    Login,
    Register,
    CreatePickupPoint,
    ListPickupPoints,
    OpenReception,
    AddProduct,
    CloseLastReception,
    DeleteLastProduct,
}

/// What a caller must present to run an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    Role(UserRole),
}

impl Operation {
    pub const ALL: [Operation; 9] = [
        Operation::DummyLogin,
        Operation::Login,
        Operation::Register,
        Operation::CreatePickupPoint,
        Operation::ListPickupPoints,
        Operation::OpenReception,
        Operation::AddProduct,
        Operation::CloseLastReception,
        Operation::DeleteLastProduct,
    ];

    pub const fn required_access(self) -> Access {
        use Operation::*;
        match self {
            DummyLogin | Login | Register => Access::Public,
            CreatePickupPoint => Access::Role(UserRole::Moderator),
            ListPickupPoints => Access::Authenticated,
            OpenReception | AddProduct | CloseLastReception | DeleteLastProduct => {
                Access::Role(UserRole::Employee)
            }
        }
    }
}

/// Caller resolved from a verified token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub role: UserRole,
    /// Absent for tokens issued by `/dummyLogin`
    pub user_id: Option<UserId>,
}

/// Why the gate refused a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    Unauthenticated,
    WrongRole { required: UserRole, actual: UserRole },
}

/// Decide whether `identity` may run `operation`
pub fn authorize(operation: Operation, identity: Option<&Identity>) -> Result<(), Denial> {
    match (operation.required_access(), identity) {
        (Access::Public, _) => Ok(()),
        (_, None) => Err(Denial::Unauthenticated),
        (Access::Authenticated, Some(_)) => Ok(()),
        (Access::Role(required), Some(identity)) if identity.role == required => Ok(()),
        (Access::Role(required), Some(identity)) => Err(Denial::WrongRole {
            required,
            actual: identity.role,
        }),
    }
}
