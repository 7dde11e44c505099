//! Named permission groups.
//!
//! Pure sugar: group helpers on the builder union these sets into the
//! request. The identifiers follow the Android manifest naming the library
//! is most commonly used with, but nothing in the pipeline depends on it.

/// Foreground location permissions.
pub const LOCATION_PERMISSIONS: &[&str] = &[
    "android.permission.ACCESS_FINE_LOCATION",
    "android.permission.ACCESS_COARSE_LOCATION",
];

/// Legacy external storage permissions.
pub const STORAGE_PERMISSIONS: &[&str] = &[
    "android.permission.READ_EXTERNAL_STORAGE",
    "android.permission.WRITE_EXTERNAL_STORAGE",
];

/// Scoped media permissions.
pub const MEDIA_PERMISSIONS: &[&str] = &[
    "android.permission.READ_MEDIA_IMAGES",
    "android.permission.READ_MEDIA_VIDEO",
    "android.permission.READ_MEDIA_AUDIO",
];

/// Camera plus microphone, the capture pair.
pub const CAMERA_AND_AUDIO_PERMISSIONS: &[&str] = &[
    "android.permission.CAMERA",
    "android.permission.RECORD_AUDIO",
];

/// Contact book permissions.
pub const CONTACTS_PERMISSIONS: &[&str] = &[
    "android.permission.READ_CONTACTS",
    "android.permission.WRITE_CONTACTS",
    "android.permission.GET_ACCOUNTS",
];

/// Calendar permissions.
pub const CALENDAR_PERMISSIONS: &[&str] = &[
    "android.permission.READ_CALENDAR",
    "android.permission.WRITE_CALENDAR",
];

/// SMS permissions.
pub const SMS_PERMISSIONS: &[&str] = &[
    "android.permission.SEND_SMS",
    "android.permission.RECEIVE_SMS",
    "android.permission.READ_SMS",
];

/// Telephony permissions.
pub const PHONE_PERMISSIONS: &[&str] = &[
    "android.permission.READ_PHONE_STATE",
    "android.permission.CALL_PHONE",
    "android.permission.READ_CALL_LOG",
];

/// Notification posting permission.
pub const NOTIFICATION_PERMISSIONS: &[&str] = &["android.permission.POST_NOTIFICATIONS"];

/// Find the named group a permission belongs to, if any.
pub fn group_of(permission: &str) -> Option<&'static [&'static str]> {
    const GROUPS: &[&[&str]] = &[
        LOCATION_PERMISSIONS,
        STORAGE_PERMISSIONS,
        MEDIA_PERMISSIONS,
        CAMERA_AND_AUDIO_PERMISSIONS,
        CONTACTS_PERMISSIONS,
        CALENDAR_PERMISSIONS,
        SMS_PERMISSIONS,
        PHONE_PERMISSIONS,
        NOTIFICATION_PERMISSIONS,
    ];
    GROUPS
        .iter()
        .find(|group| group.contains(&permission))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn group_of_finds_membership() {
        assert_eq!(
            group_of("android.permission.CAMERA"),
            Some(CAMERA_AND_AUDIO_PERMISSIONS)
        );
        assert_eq!(
            group_of("android.permission.READ_CALENDAR"),
            Some(CALENDAR_PERMISSIONS)
        );
        assert_eq!(group_of("android.permission.BODY_SENSORS"), None);
    }
}
