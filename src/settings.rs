/// Settings page state.
///
/// Edits mark the page dirty until `save` or `reset_to_defaults`. Saving only
/// logs; nothing is written anywhere.

use log::info;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralSettings {
    pub language: String,
    pub timezone: String,
    pub date_format: String,
    pub twelve_hour_clock: bool,
    pub auto_save: bool,
    pub confirm_deletes: bool,
    pub show_tips: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailNotifications {
    pub appointments: bool,
    pub cancellations: bool,
    pub reminders: bool,
    pub payments: bool,
    pub marketing: bool,
    pub system_updates: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushNotifications {
    pub appointments: bool,
    pub urgent_messages: bool,
    pub system_alerts: bool,
    pub new_patients: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsNotifications {
    pub appointments: bool,
    pub urgent_only: bool,
    pub payment_reminders: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundSettings {
    pub enabled: bool,
    /// 0-100.
    pub volume: u8,
    pub new_appointment: bool,
    pub message_alert: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub email: EmailNotifications,
    pub push: PushNotifications,
    pub sms: SmsNotifications,
    pub sound: SoundSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecuritySettings {
    pub two_factor_auth: bool,
    pub session_timeout_minutes: u32,
    pub login_notifications: bool,
    pub password_expiry_days: u32,
    pub allow_multiple_sessions: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppearanceSettings {
    pub theme: Theme,
    pub compact_mode: bool,
    pub animations_enabled: bool,
    pub font_size: FontSize,
    pub sidebar_collapsed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSettings {
    pub data_retention: String,
    pub anonymize_data: bool,
    pub share_analytics: bool,
    pub backup_frequency: String,
    pub export_format: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorSettings {
    pub general: GeneralSettings,
    pub notifications: NotificationSettings,
    pub security: SecuritySettings,
    pub appearance: AppearanceSettings,
    pub data: DataSettings,
}

impl Default for DoctorSettings {
    fn default() -> Self {
        DoctorSettings {
            general: GeneralSettings {
                language: "en".to_string(),
                timezone: "Asia/Dhaka".to_string(),
                date_format: "MM/dd/yyyy".to_string(),
                twelve_hour_clock: true,
                auto_save: true,
                confirm_deletes: true,
                show_tips: true,
            },
            notifications: NotificationSettings {
                email: EmailNotifications {
                    appointments: true,
                    cancellations: true,
                    reminders: true,
                    payments: true,
                    marketing: false,
                    system_updates: true,
                },
                push: PushNotifications {
                    appointments: true,
                    urgent_messages: true,
                    system_alerts: true,
                    new_patients: true,
                },
                sms: SmsNotifications {
                    appointments: false,
                    urgent_only: true,
                    payment_reminders: true,
                },
                sound: SoundSettings {
                    enabled: true,
                    volume: 70,
                    new_appointment: true,
                    message_alert: true,
                },
            },
            security: SecuritySettings {
                two_factor_auth: false,
                session_timeout_minutes: 30,
                login_notifications: true,
                password_expiry_days: 90,
                allow_multiple_sessions: false,
            },
            appearance: AppearanceSettings {
                theme: Theme::Light,
                compact_mode: false,
                animations_enabled: true,
                font_size: FontSize::Medium,
                sidebar_collapsed: false,
            },
            data: DataSettings {
                data_retention: "7years".to_string(),
                anonymize_data: false,
                share_analytics: true,
                backup_frequency: "daily".to_string(),
                export_format: "pdf".to_string(),
            },
        }
    }
}

#[derive(Debug, Default)]
pub struct SettingsPage {
    settings: DoctorSettings,
    has_changes: bool,
}

impl SettingsPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn settings(&self) -> &DoctorSettings {
        &self.settings
    }

    pub fn has_changes(&self) -> bool {
        self.has_changes
    }

    /// Apply an edit and mark the page dirty if anything changed.
    pub fn update<F: FnOnce(&mut DoctorSettings)>(&mut self, edit: F) {
        let before = self.settings.clone();
        edit(&mut self.settings);
        self.settings.notifications.sound.volume = self.settings.notifications.sound.volume.min(100);
        if self.settings != before {
            self.has_changes = true;
        }
    }

    pub fn save(&mut self) -> &DoctorSettings {
        match serde_json::to_string(&self.settings) {
            Ok(json) => info!("Saving settings: {}", json),
            Err(_) => info!("Saving settings"),
        }
        self.has_changes = false;
        &self.settings
    }

    pub fn reset_to_defaults(&mut self) {
        info!("Resetting to defaults");
        self.settings = DoctorSettings::default();
        self.has_changes = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_marks_dirty_and_save_clears() {
        let mut page = SettingsPage::new();
        assert!(!page.has_changes());

        page.update(|s| s.security.two_factor_auth = true);
        assert!(page.has_changes());
        assert!(page.save().security.two_factor_auth);
        assert!(!page.has_changes());
    }

    #[test]
    fn no_op_update_stays_clean() {
        let mut page = SettingsPage::new();
        page.update(|s| s.general.language = "en".to_string());
        assert!(!page.has_changes());
    }

    #[test]
    fn volume_is_clamped() {
        let mut page = SettingsPage::new();
        page.update(|s| s.notifications.sound.volume = 250);
        assert_eq!(page.settings().notifications.sound.volume, 100);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut page = SettingsPage::new();
        page.update(|s| s.appearance.theme = Theme::Dark);
        page.reset_to_defaults();
        assert_eq!(page.settings(), &DoctorSettings::default());
        assert!(!page.has_changes());
    }

    #[test]
    fn settings_serialize_enums_lowercase() {
        let json = serde_json::to_value(DoctorSettings::default()).unwrap();
        assert_eq!(json["appearance"]["theme"], "light");
        assert_eq!(json["appearance"]["font_size"], "medium");
    }
}
