// User endpoints
//
// Registration and login live outside `/api/v1` and are the only calls
// sent without credentials.

use crate::client::Client;
use crate::envelope::PagedResult;
use crate::error::Error;
use crate::models::{
    ChangeActiveHouseholdInput, TokenResponse, User, UserCreationResponse, UserLoginInput,
    UserRegistrationInput,
};
use crate::observe::Context;
use crate::query::QueryFilter;
use crate::request::{AvatarUpload, Method, SearchKind};
use crate::resource::{Extra, Ops, Resource, fetch_slot};

// ── Descriptors ──────────────────────────────────────────────────────

const REGISTER_USER: Extra = Extra {
    operation: "CreateUser",
    method: Method::Post,
    path: "/users",
    params: &[],
};

const LOGIN_FOR_TOKEN: Extra = Extra {
    operation: "LoginForJWT",
    method: Method::Post,
    path: "/users/login/jwt",
    params: &[],
};

const SELF: Extra = Extra {
    operation: "GetSelf",
    method: Method::Get,
    path: "/api/v1/users/self",
    params: &[],
};

const SEARCH_BY_USERNAME: Extra = Extra {
    operation: "SearchForUsersByUsername",
    method: Method::Get,
    path: "/api/v1/users/search",
    params: &[],
};

const UPLOAD_AVATAR: Extra = Extra {
    operation: "UploadNewAvatar",
    method: Method::Post,
    path: "/api/v1/users/avatar/upload",
    params: &[],
};

const SWITCH_HOUSEHOLD: Extra = Extra {
    operation: "SwitchActiveHousehold",
    method: Method::Post,
    path: "/api/v1/users/household/select",
    params: &[],
};

/// Users are created through registration, not `POST /api/v1/users`.
pub const USERS: Resource = Resource {
    name: "User",
    plural: "Users",
    path: "/api/v1/users/%s",
    list_path: "/api/v1/users",
    search_path: None,
    id_params: &["userID"],
    ops: Ops {
        list: true,
        create: false,
        update: None,
        archive: true,
    },
    extras: &[
        REGISTER_USER,
        LOGIN_FOR_TOKEN,
        SELF,
        SEARCH_BY_USERNAME,
        UPLOAD_AVATAR,
        SWITCH_HOUSEHOLD,
    ],
};

// ── Account ──────────────────────────────────────────────────────────

impl Client {
    /// Register a new account. Sent without credentials.
    ///
    /// `POST /users`
    pub async fn create_user(
        &self,
        cx: &Context,
        input: &UserRegistrationInput,
    ) -> Result<UserCreationResponse, Error> {
        let spec = REGISTER_USER
            .spec(&[])
            .json(Some(input))
            .unauthenticated()
            .expect_data();
        fetch_slot(self, cx, spec).await
    }

    /// Exchange a username and password for a JWT. Sent without credentials.
    ///
    /// Build a bearer client from the result with
    /// [`Client::with_credentials`].
    ///
    /// `POST /users/login/jwt`
    pub async fn login_for_token(
        &self,
        cx: &Context,
        input: &UserLoginInput,
    ) -> Result<TokenResponse, Error> {
        let spec = LOGIN_FOR_TOKEN
            .spec(&[])
            .json(Some(input))
            .unauthenticated()
            .expect_data();
        fetch_slot(self, cx, spec).await
    }

    /// `GET /api/v1/users/self`
    pub async fn get_self(&self, cx: &Context) -> Result<User, Error> {
        SELF.fetch(self, cx, &[]).await
    }

    /// Replace the caller's avatar. The body is `multipart/form-data`.
    ///
    /// `POST /api/v1/users/avatar/upload`
    pub async fn upload_new_avatar(&self, cx: &Context, upload: &AvatarUpload) -> Result<(), Error> {
        let spec = UPLOAD_AVATAR.spec(&[]).avatar(upload);
        self.execute_discarding(cx, spec).await
    }

    /// Make another household the active one for these credentials.
    ///
    /// `POST /api/v1/users/household/select`
    pub async fn switch_active_household(&self, cx: &Context, household_id: &str) -> Result<(), Error> {
        let input = ChangeActiveHouseholdInput {
            household_id: household_id.to_owned(),
        };
        let spec = SWITCH_HOUSEHOLD.spec(&[]).json(Some(&input));
        self.execute_discarding(cx, spec).await
    }
}

// ── Directory ────────────────────────────────────────────────────────

impl Client {
    /// `GET /api/v1/users/{userID}`
    pub async fn get_user(&self, cx: &Context, user_id: &str) -> Result<User, Error> {
        USERS.fetch(self, cx, &[user_id]).await
    }

    /// `GET /api/v1/users`
    pub async fn get_users(
        &self,
        cx: &Context,
        filter: Option<&QueryFilter>,
    ) -> Result<PagedResult<User>, Error> {
        USERS.list(self, cx, &[], filter).await
    }

    /// Find users whose username starts with `username`.
    ///
    /// `GET /api/v1/users/search?limit=..&q=..`
    pub async fn search_for_users_by_username(
        &self,
        cx: &Context,
        username: &str,
        limit: u16,
    ) -> Result<Vec<User>, Error> {
        SEARCH_BY_USERNAME
            .search(self, cx, &[], SearchKind::Username, username, limit)
            .await
    }

    /// `DELETE /api/v1/users/{userID}`
    pub async fn archive_user(&self, cx: &Context, user_id: &str) -> Result<(), Error> {
        USERS.archive(self, cx, &[user_id]).await
    }
}
