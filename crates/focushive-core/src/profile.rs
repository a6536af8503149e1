//! User profile editing backed by the key-value store.
//!
//! The profile is an explicit state object owned by a [`ProfileEditor`];
//! nothing is read from or written to storage except through
//! [`ProfileEditor::load`] and [`ProfileEditor::save`].

use std::sync::LazyLock;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{FieldError, Result, ValidationError};
use crate::events::Notification;
use crate::storage::{load_json, save_json, KeyValueStore};

/// Storage key for the serialized profile.
pub const PROFILE_KEY: &str = "focushive.user_data";

pub const MAX_BIO_CHARS: usize = 200;
pub const MAX_AVATAR_BYTES: usize = 2 * 1024 * 1024;
pub const AVATAR_MIME_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("hardcoded regex should compile")
});
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9]\d{0,15}$").expect("hardcoded regex should compile"));
static PHONE_NOISE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[()\-\s]").expect("hardcoded regex should compile"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub bio: String,
    /// `data:` URL of the avatar image.
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub study_hours: u32,
    #[serde(default)]
    pub day_streak: u32,
    /// Percentage of the weekly goal reached.
    #[serde(default)]
    pub weekly_goal: u32,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            email: String::new(),
            phone: String::new(),
            bio: String::new(),
            profile_image: None,
            study_hours: 245,
            day_streak: 7,
            weekly_goal: 89,
        }
    }
}

impl UserProfile {
    /// Name for the profile header.
    pub fn display_name(&self) -> &str {
        if self.full_name.is_empty() {
            "Welcome to FocusHive!"
        } else {
            &self.full_name
        }
    }

    /// Letter shown in place of a missing avatar.
    pub fn initial(&self) -> char {
        self.full_name
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?')
    }

    /// Current values as an editable form.
    pub fn form(&self) -> ProfileForm {
        ProfileForm {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            bio: self.bio.clone(),
        }
    }
}

/// The editable personal-information fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub bio: String,
}

impl ProfileForm {
    /// Check every field, reporting all failures at once.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        let mut errors = Vec::new();
        let mut fail = |field, message: &str| {
            errors.push(FieldError {
                field,
                message: message.to_string(),
            })
        };

        if self.full_name.trim().is_empty() {
            fail("fullName", "Full name is required");
        }

        let email = self.email.trim();
        if email.is_empty() {
            fail("email", "Email is required");
        } else if !EMAIL_RE.is_match(email) {
            fail("email", "Please enter a valid email address");
        }

        let phone = self.phone.trim();
        if !phone.is_empty() && !PHONE_RE.is_match(&PHONE_NOISE_RE.replace_all(phone, "")) {
            fail("phone", "Please enter a valid phone number");
        }

        if self.bio.trim().chars().count() > MAX_BIO_CHARS {
            fail("bio", "Bio cannot exceed 200 characters");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::Form(errors))
        }
    }
}

/// An image picked for the avatar, before it is accepted.
#[derive(Debug, Clone)]
pub struct AvatarUpload {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl AvatarUpload {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Guess the MIME type from a file extension.
    pub fn mime_for_extension(ext: &str) -> &'static str {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "gif" => "image/gif",
            "webp" => "image/webp",
            _ => "application/octet-stream",
        }
    }

    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if !AVATAR_MIME_TYPES.contains(&self.mime_type.as_str()) {
            return Err(ValidationError::UnsupportedImageType(self.mime_type.clone()));
        }
        Self::check_size(self.bytes.len() as u64)
    }

    /// Size limit on its own, so callers can reject a file before reading it.
    pub fn check_size(size: u64) -> std::result::Result<(), ValidationError> {
        if size > MAX_AVATAR_BYTES as u64 {
            return Err(ValidationError::ImageTooLarge { size });
        }
        Ok(())
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }
}

/// Owns a profile and the store it is persisted in.
pub struct ProfileEditor<S> {
    profile: UserProfile,
    store: S,
}

impl<S: KeyValueStore> ProfileEditor<S> {
    /// Start from defaults; call [`load`](Self::load) to pick up saved data.
    pub fn new(store: S) -> Self {
        Self {
            profile: UserProfile::default(),
            store,
        }
    }

    /// Create an editor and load the saved profile, if any.
    pub fn open(store: S) -> Result<Self> {
        let mut editor = Self::new(store);
        editor.load()?;
        Ok(editor)
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Replace the in-memory profile with the saved one. Returns whether
    /// anything was saved.
    pub fn load(&mut self) -> Result<bool> {
        match load_json::<UserProfile, _>(&self.store, PROFILE_KEY)? {
            Some(saved) => {
                self.profile = saved;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn save(&mut self) -> Result<()> {
        save_json(&mut self.store, PROFILE_KEY, &self.profile)?;
        Ok(())
    }

    /// Validate and apply the form, then persist.
    pub fn submit(&mut self, form: &ProfileForm) -> Result<Notification> {
        form.validate()
            .inspect_err(|err| warn!(%err, "profile form rejected"))?;
        self.profile.full_name = form.full_name.trim().to_string();
        self.profile.email = form.email.trim().to_string();
        self.profile.phone = form.phone.trim().to_string();
        self.profile.bio = form.bio.trim().to_string();
        self.save()?;
        debug!("profile saved");
        Ok(Notification::success("Profile updated successfully!"))
    }

    /// Discard unsaved edits by reloading the saved values.
    pub fn reset_form(&mut self) -> Result<(ProfileForm, Notification)> {
        if !self.load()? {
            self.profile = UserProfile::default();
        }
        Ok((
            self.profile.form(),
            Notification::info("Form reset to saved values"),
        ))
    }

    pub fn set_avatar(&mut self, upload: &AvatarUpload) -> Result<Notification> {
        upload
            .validate()
            .inspect_err(|err| warn!(%err, "avatar rejected"))?;
        self.profile.profile_image = Some(upload.to_data_url());
        self.save()?;
        Ok(Notification::success("Profile picture updated successfully!"))
    }

    /// Remove the avatar. `None` when there was nothing to remove.
    pub fn delete_avatar(&mut self) -> Result<Option<Notification>> {
        if self.profile.profile_image.take().is_none() {
            return Ok(None);
        }
        self.save()?;
        Ok(Some(Notification::success(
            "Profile picture deleted successfully!",
        )))
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
