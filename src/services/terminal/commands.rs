use crate::colony::Colony;
use crate::models::errors::{ColonyError, ColonyResult};
use crate::models::events::{ColonyEvent, Modal};
use crate::models::line::TerminalLine;
use crate::services::{expendables, missions, scan};

pub(super) fn help(colony: &mut Colony) {
    colony.say(TerminalLine::success("Available commands:"));
    colony.say_all(
        [
            "- help: Display this help message",
            "- status: Show colony and expendable status",
            "- scan: Scan for creeper activity",
            "- history: Show mission history",
            "- resources: Check colony resources",
            "- weather: Show weather forecast",
            "- alert: Trigger colony-wide alert",
            "- map: Display colony sector map",
            "- deploy: Deploy expendable on mission",
            "- contact: Attempt creeper communication",
            "- mission: View active mission details",
            "- expendables: View expendable status",
            "- clear: Clear terminal",
            "- terminate: Terminate specific expendable",
            "- override: Override system protocols (requires authorization)",
        ]
        .map(TerminalLine::plain),
    );
}

pub(super) fn status(colony: &mut Colony) {
    let active: Vec<String> = colony
        .expendables
        .active()
        .map(|e| format!("Mickey #{}", e.id))
        .collect();

    colony.say(TerminalLine::plain("Colony Status: OPERATIONAL"));
    colony.say(TerminalLine::plain("Population: 203 colonists"));
    let roster = if active.is_empty() {
        "Expendables: 0 active".to_string()
    } else {
        format!("Expendables: {} active ({})", active.len(), active.join(", "))
    };
    colony.say(TerminalLine::plain(roster));
    if active.len() > 1 && !colony.terminal.admin {
        colony.say(TerminalLine::warning(
            "WARNING: Multiple Mickeys detected. Protocol violation.",
        ));
    }
    colony.say_all(
        [
            "Temperature: -48°C (External), 19°C (Internal)",
            "Power systems: 92% efficiency",
            "Next supply shipment: 148 days",
        ]
        .map(TerminalLine::plain),
    );
}

pub(super) fn scan(colony: &mut Colony) {
    scan::perimeter_scan(colony);
}

pub(super) fn history(colony: &mut Colony) {
    colony.say(TerminalLine::plain("Retrieving mission history..."));
    let lines = vec![
        TerminalLine::success("Recent missions:"),
        TerminalLine::plain(
            "1. 2054-05-13 09:45:22 Multiple situation under review. Both expendables confined to quarters.",
        ),
        TerminalLine::warning(
            "2. 2054-05-13 07:12:18 WARNING: Multiple Mickeys detected. Protocol violation.",
        ),
        TerminalLine::plain(
            "3. 2054-05-13 06:30:44 Mickey #7 returned to base. Reported unusual creeper behavior.",
        ),
        TerminalLine::plain("4. 2054-05-12 13:15:09 Initiated printing of Mickey #8."),
        TerminalLine::warning(
            "5. 2054-05-12 11:47:32 Lost contact with Mickey #7 after falling into ice crevasse.",
        ),
        TerminalLine::plain(
            "6. 2054-05-12 08:23:17 Mickey #7 dispatched to sector 12 for routine creeper activity monitoring.",
        ),
    ];
    colony.say_after(500, lines);
}

pub(super) fn resources(colony: &mut Colony) {
    colony.say_all([
        TerminalLine::plain("Colony resources at 67% capacity."),
        TerminalLine::plain("Food: 73% (42 days remaining)"),
        TerminalLine::plain("Water: 89% (65 days remaining)"),
        TerminalLine::plain("Fuel: 58% (31 days remaining)"),
        TerminalLine::warning("Medical supplies: 44% (CRITICAL)"),
        TerminalLine::plain("Oxygen generation: 96% capacity"),
        TerminalLine::plain("Spare parts: 52% of minimum recommended inventory"),
        TerminalLine::plain("Expendable printing materials: 78% (capacity for 4 more prints)"),
    ]);
}

pub(super) fn weather(colony: &mut Colony) {
    colony.say_all([
        TerminalLine::plain("Current weather conditions:"),
        TerminalLine::plain("Temperature: -48°C"),
        TerminalLine::plain("Wind: 37 km/h from NE"),
        TerminalLine::plain("Visibility: Poor (ice storm approaching)"),
        TerminalLine::plain("Barometric pressure: 876 hPa (falling)"),
        TerminalLine::plain("Precipitation: Light snowfall (2cm/hour)"),
        TerminalLine::plain("UV index: Low"),
        TerminalLine::success("Forecast:"),
        TerminalLine::plain(
            "Next 24 hours: Continued blizzard conditions, temperatures dropping to -56°C",
        ),
        TerminalLine::plain("48-72 hours: Storm clearing, temperatures steady at -42°C"),
        TerminalLine::warning("WARNING: Outdoor missions not recommended for next 48 hours"),
        TerminalLine::error("ALERT: Whiteout conditions expected in 4-6 hours, duration 18+ hours"),
    ]);
}

pub(super) fn alert(colony: &mut Colony) {
    colony.say(TerminalLine::error("ALERT SYSTEM ACTIVATED"));
    colony.emit(ColonyEvent::ModalOpened(Modal::Alert));
}

pub(super) fn clear(colony: &mut Colony) {
    colony.terminal.screen.clear();
    colony.emit(ColonyEvent::ScreenCleared);
    colony.say(TerminalLine::success("Terminal cleared."));
}

/// `terminate <id>`: arm a termination that `override` must authorize.
pub(super) fn terminate(colony: &mut Colony, args: &[&str]) -> ColonyResult<()> {
    let raw = args.get(1).ok_or(ColonyError::MissingArgument {
        command: "terminate",
        hint: "Please specify which expendable to terminate: \"terminate 7\" or \"terminate 8\"",
    })?;
    let id = expendables::parse_id(colony, raw)?;
    if !colony.expendables.is_active(id) {
        return Err(ColonyError::ExpendableTerminated(id));
    }

    colony.terminal.pending_termination = Some(id);
    colony.say(TerminalLine::warning(format!(
        "WARNING: Termination protocol initiated for Mickey #{}",
        id
    )));
    colony.say_after(
        1500,
        vec![
            TerminalLine::error("ERROR: Termination requires authorization from colony leader"),
            TerminalLine::plain("Hint: Use \"override niflheim\" command with proper authorization"),
        ],
    );
    Ok(())
}

/// `override <code>`: grant admin and carry out any armed termination.
pub(super) fn override_protocols(colony: &mut Colony, args: &[&str]) -> ColonyResult<()> {
    let code = args.get(1).ok_or(ColonyError::MissingArgument {
        command: "override",
        hint: "Override code required. Please enter in format: \"override [code]\"",
    })?;

    if !expendables::authorize(code) {
        expendables::log_security_alert(colony, "Invalid override code entered at terminal");
        return Err(ColonyError::AuthorizationDenied(code.to_string()));
    }

    colony.terminal.admin = true;
    colony.say_all([
        TerminalLine::success("Override accepted. Administrator privileges granted."),
        TerminalLine::warning("All systems unlocked. Proceed with caution."),
        TerminalLine::plain("Multiple expendable protocol disabled."),
    ]);
    colony.emit(ColonyEvent::AdminUnlocked);
    tracing::info!("administrator override granted");

    if let Some(id) = colony.terminal.pending_termination.take() {
        expendables::terminate(colony, id, 0);
    }
    Ok(())
}

pub(super) fn map(colony: &mut Colony) {
    colony.say(TerminalLine::plain("Displaying colony sector map..."));
    colony.say(TerminalLine::plain("Map is available in the Colony Map panel."));
    colony.emit(ColonyEvent::MapFocused);
}

pub(super) fn deploy(colony: &mut Colony) {
    colony.say(TerminalLine::plain("Opening mission deployment interface..."));
    colony.emit(ColonyEvent::ModalOpened(Modal::Deploy));
}

/// Attempt to talk to the creepers; the reply trickles in over ~4 seconds.
pub(super) fn contact(colony: &mut Colony) {
    colony.say(TerminalLine::plain(
        "Attempting to establish communication with creepers...",
    ));
    colony.say_after(
        1000,
        vec![TerminalLine::plain("Configuring transmission frequency...")],
    );
    colony.say_after(
        1800,
        vec![TerminalLine::plain("Broadcasting greeting signals on all channels...")],
    );
    colony.say_after(2600, vec![TerminalLine::plain("Monitoring for response...")]);
    colony.say_after(
        3600,
        vec![TerminalLine::warning(
            "Unusual sonic patterns detected. Possible intelligent response.",
        )],
    );
    colony.say_after(
        4400,
        vec![
            TerminalLine::success("Communication attempt analysis:"),
            TerminalLine::plain("- Non-random pattern detected in return signals"),
            TerminalLine::plain("- 78% certainty of intelligent origin"),
            TerminalLine::plain("- Mathematical sequence identified in response"),
            TerminalLine::plain("- Recommend further contact attempts with Mickey #7 present"),
        ],
    );
}

pub(super) fn mission(colony: &mut Colony) {
    let lines = missions::briefing_lines(colony);
    colony.say_all(lines);
}

pub(super) fn expendables(colony: &mut Colony) {
    colony.say(TerminalLine::success("Expendable status:"));
    let lines: Vec<TerminalLine> = colony
        .expendables
        .iter()
        .flat_map(expendables::status_lines)
        .collect();
    colony.say_all(lines);
    if colony.expendables.active_count() > 1 && !colony.terminal.admin {
        colony.say(TerminalLine::warning(
            "WARNING: Multiple Mickeys detected. Protocol violation.",
        ));
    }
}
