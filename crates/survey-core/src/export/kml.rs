//! `template.kml`: mission metadata and global settings.

use super::xml::{decimal, XmlDocument};
use crate::error::ExportError;
use crate::models::MissionConfig;
use chrono::{DateTime, Utc};

pub(crate) fn write_template(
    config: &MissionConfig,
    timestamp: DateTime<Utc>,
) -> Result<Vec<u8>, ExportError> {
    let mut doc = XmlDocument::new()?;
    doc.start_kml()?;
    doc.start("Document")?;

    if let Some(author) = &config.author {
        doc.leaf("wpml:author", author)?;
    }
    let millis = timestamp.timestamp_millis();
    doc.leaf("wpml:createTime", millis)?;
    doc.leaf("wpml:updateTime", millis)?;
    write_mission_config(&mut doc, config)?;

    doc.end("Document")?;
    doc.end("kml")?;
    Ok(doc.into_bytes())
}

/// `<wpml:missionConfig>`, shared by both documents.
pub(crate) fn write_mission_config(
    doc: &mut XmlDocument,
    config: &MissionConfig,
) -> Result<(), ExportError> {
    doc.start("wpml:missionConfig")?;
    doc.leaf("wpml:flyToWaylineMode", config.fly_to_wayline_mode.as_wpml())?;
    doc.leaf("wpml:finishAction", config.finish_action.as_wpml())?;
    doc.leaf("wpml:exitOnRCLost", config.exit_on_rc_lost.as_wpml())?;
    doc.leaf("wpml:executeRCLostAction", config.execute_rc_lost_action.as_wpml())?;
    doc.leaf(
        "wpml:takeOffSecurityHeight",
        decimal(config.take_off_security_height_m, 2),
    )?;
    doc.leaf(
        "wpml:globalTransitionalSpeed",
        decimal(config.global_transitional_speed_mps, 2),
    )?;
    doc.start("wpml:droneInfo")?;
    doc.leaf("wpml:droneEnumValue", config.drone_info.enum_value)?;
    doc.leaf("wpml:droneSubEnumValue", config.drone_info.sub_enum_value)?;
    doc.end("wpml:droneInfo")?;
    doc.end("wpml:missionConfig")
}
