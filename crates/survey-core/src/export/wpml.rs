//! `waylines.wpml`: the executable route, one Placemark per waypoint.

use super::kml::write_mission_config;
use super::records::{ActionGroup, ActuatorFunc, PlacemarkRecord, Wayline};
use super::xml::{decimal, flag, XmlDocument};
use crate::error::ExportError;
use crate::models::MissionConfig;

/// Fixed decimal places for longitude/latitude (about 1 mm), never trimmed.
const COORDINATE_DECIMALS: usize = 8;

pub(crate) fn write_waylines(
    config: &MissionConfig,
    wayline: &Wayline,
) -> Result<Vec<u8>, ExportError> {
    let mut doc = XmlDocument::new()?;
    doc.start_kml()?;
    doc.start("Document")?;
    write_mission_config(&mut doc, config)?;

    doc.start("Folder")?;
    doc.leaf("wpml:templateId", wayline.template_id)?;
    doc.leaf("wpml:executeHeightMode", wayline.execute_height_mode.as_wpml())?;
    doc.leaf("wpml:waylineId", wayline.wayline_id)?;
    doc.leaf("wpml:distance", decimal(wayline.distance_m, 2))?;
    doc.leaf("wpml:duration", decimal(wayline.duration_s, 2))?;
    doc.leaf("wpml:autoFlightSpeed", decimal(wayline.auto_flight_speed_mps, 2))?;
    for placemark in &wayline.placemarks {
        write_placemark(&mut doc, placemark)?;
    }
    doc.end("Folder")?;

    doc.end("Document")?;
    doc.end("kml")?;
    Ok(doc.into_bytes())
}

fn write_placemark(doc: &mut XmlDocument, placemark: &PlacemarkRecord) -> Result<(), ExportError> {
    doc.start("Placemark")?;

    doc.start("Point")?;
    doc.leaf(
        "coordinates",
        format!(
            "{:.*},{:.*}",
            COORDINATE_DECIMALS, placemark.lng, COORDINATE_DECIMALS, placemark.lat
        ),
    )?;
    doc.end("Point")?;

    doc.leaf("wpml:index", placemark.index)?;
    doc.leaf("wpml:executeHeight", decimal(placemark.execute_height_m, 2))?;
    doc.leaf("wpml:waypointSpeed", decimal(placemark.waypoint_speed_mps, 2))?;

    doc.start("wpml:waypointHeadingParam")?;
    doc.leaf("wpml:waypointHeadingMode", placemark.heading.mode())?;
    if let Some(angle) = placemark.heading.angle_deg {
        doc.leaf("wpml:waypointHeadingAngle", decimal(angle, 1))?;
    }
    doc.leaf("wpml:waypointPoiPoint", "0.000000,0.000000,0.000000")?;
    doc.leaf("wpml:waypointHeadingAngleEnable", flag(placemark.heading.angle_deg.is_some()))?;
    doc.leaf("wpml:waypointHeadingPathMode", "followBadArc")?;
    doc.end("wpml:waypointHeadingParam")?;

    doc.start("wpml:waypointTurnParam")?;
    doc.leaf("wpml:waypointTurnMode", placemark.turn.mode.as_wpml())?;
    doc.leaf("wpml:waypointTurnDampingDist", decimal(placemark.turn.damping_dist_m, 2))?;
    doc.end("wpml:waypointTurnParam")?;

    doc.leaf("wpml:useStraightLine", flag(placemark.use_straight_line))?;

    if let Some(group) = &placemark.action_group {
        write_action_group(doc, group)?;
    }

    doc.end("Placemark")
}

fn write_action_group(doc: &mut XmlDocument, group: &ActionGroup) -> Result<(), ExportError> {
    doc.start("wpml:actionGroup")?;
    doc.leaf("wpml:actionGroupId", group.id)?;
    doc.leaf("wpml:actionGroupStartIndex", group.start_index)?;
    doc.leaf("wpml:actionGroupEndIndex", group.end_index)?;
    doc.leaf("wpml:actionGroupMode", "sequence")?;
    doc.start("wpml:actionTrigger")?;
    doc.leaf("wpml:actionTriggerType", "reachPoint")?;
    doc.end("wpml:actionTrigger")?;

    for action in &group.actions {
        doc.start("wpml:action")?;
        doc.leaf("wpml:actionId", action.id)?;
        doc.leaf("wpml:actionActuatorFunc", action.func.name())?;
        doc.start("wpml:actionActuatorFuncParam")?;
        match action.func {
            ActuatorFunc::GimbalRotate { pitch_deg } => {
                doc.leaf("wpml:gimbalRotateMode", "absoluteAngle")?;
                doc.leaf("wpml:gimbalPitchRotateEnable", 1)?;
                doc.leaf("wpml:gimbalPitchRotateAngle", decimal(pitch_deg, 1))?;
                doc.leaf("wpml:gimbalRollRotateEnable", 0)?;
                doc.leaf("wpml:gimbalYawRotateEnable", 0)?;
                doc.leaf("wpml:gimbalRotateTimeEnable", 0)?;
            }
            ActuatorFunc::TakePhoto | ActuatorFunc::StartRecord => {
                doc.leaf("wpml:fileSuffix", "")?;
                doc.leaf("wpml:useGlobalPayloadLensIndex", 1)?;
            }
            ActuatorFunc::StopRecord => {}
        }
        doc.leaf("wpml:payloadPositionIndex", 0)?;
        doc.end("wpml:actionActuatorFuncParam")?;
        doc.end("wpml:action")?;
    }

    doc.end("wpml:actionGroup")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Waypoint, WaypointAction};

    fn waypoints() -> Vec<Waypoint> {
        (0..3)
            .map(|i| Waypoint {
                index: 10 + i,
                lat: 33.123456789,
                lng: -117.5 + i as f64 * 0.001,
                altitude_m: 60.0,
                speed_mps: 8.9408,
                heading_deg: 270.0,
                action: WaypointAction::TakePhoto,
                gimbal_pitch_deg: Some(-90.0),
            })
            .collect()
    }

    fn render(waypoints: &[Waypoint]) -> String {
        let config = MissionConfig::default();
        let wayline = Wayline::from_waypoints(waypoints, &config);
        String::from_utf8(write_waylines(&config, &wayline).unwrap()).unwrap()
    }

    #[test]
    fn placemarks_follow_waypoint_order() {
        let xml = render(&waypoints());

        assert_eq!(xml.matches("<Placemark>").count(), 3);
        assert!(xml.contains("<coordinates>-117.50000000,33.12345679</coordinates>"));
        assert!(xml.contains("<coordinates>-117.49900000,33.12345679</coordinates>"));
        let first = xml.find("<wpml:index>10</wpml:index>").unwrap();
        let last = xml.find("<wpml:index>12</wpml:index>").unwrap();
        assert!(first < last);
        assert!(xml.contains("<wpml:executeHeight>60</wpml:executeHeight>"));
        assert!(xml.contains("<wpml:waypointSpeed>8.94</wpml:waypointSpeed>"));
        assert!(xml.contains("<wpml:waypointHeadingAngle>-90</wpml:waypointHeadingAngle>"));
        assert!(xml.contains("<wpml:executeHeightMode>relativeToStartPoint</wpml:executeHeightMode>"));
    }

    #[test]
    fn whole_degree_coordinates_keep_their_decimals() {
        let mut waypoints = waypoints();
        waypoints.truncate(1);
        waypoints[0].lat = 33.5;
        waypoints[0].lng = -117.0;
        let xml = render(&waypoints);

        assert!(xml.contains("<coordinates>-117.00000000,33.50000000</coordinates>"), "{xml}");
    }

    #[test]
    fn gimbal_rotate_is_emitted_once() {
        let xml = render(&waypoints());

        assert_eq!(xml.matches("<wpml:actionGroup>").count(), 3);
        assert_eq!(xml.matches("<wpml:actionActuatorFunc>gimbalRotate</wpml:actionActuatorFunc>").count(), 1);
        assert_eq!(xml.matches("<wpml:actionActuatorFunc>takePhoto</wpml:actionActuatorFunc>").count(), 3);
        assert!(xml.contains("<wpml:gimbalPitchRotateAngle>-90</wpml:gimbalPitchRotateAngle>"));
        assert!(xml.contains("<wpml:actionGroupId>2</wpml:actionGroupId>"));
    }

    #[test]
    fn no_action_waypoints_have_no_action_groups() {
        let mut waypoints = waypoints();
        for wp in &mut waypoints {
            wp.action = WaypointAction::NoAction;
            wp.gimbal_pitch_deg = None;
        }
        let xml = render(&waypoints);

        assert_eq!(xml.matches("<Placemark>").count(), 3);
        assert!(!xml.contains("actionGroup"));
    }
}
