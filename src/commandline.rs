use anyhow::{anyhow, Context, Result};
use log::*;
use rtd_lib::board::{self, Board};
use rtd_lib::bus::{RegisterBus, Transport};
use rtd_lib::protocol::{self as proto, IntoChecked};
use std::ffi::OsString;
use std::fmt;
use std::io::{self, Write};

pub const PROGRAM: &str = "rtd";

const WARRANTY: &str = "\
This program is free software, dual licensed under the MIT license and the
Apache License, Version 2.0, at your option.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
license texts for more details.";

/// What a command runs against: the bus and the stream its output goes to.
pub struct Session<'a> {
    pub transport: &'a mut dyn Transport,
    pub out: &'a mut dyn Write,
}

/// Failure of a single handler.
pub enum CommandError {
    /// The handler got the wrong number of arguments.
    ArgumentCount,
    Failed(anyhow::Error),
}

impl From<anyhow::Error> for CommandError {
    fn from(error: anyhow::Error) -> Self {
        Self::Failed(error)
    }
}

impl From<io::Error> for CommandError {
    fn from(error: io::Error) -> Self {
        Self::Failed(anyhow::Error::new(error).context("Cannot write output"))
    }
}

type Handler = fn(&mut Session, &[String]) -> Result<(), CommandError>;

/// One entry of the command table.
pub struct Command {
    pub name: &'static str,
    /// Index into the argument vector where `name` is expected.
    pub name_pos: usize,
    handler: Handler,
    pub help: &'static str,
    pub usage: &'static [&'static str],
    pub example: &'static str,
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("name_pos", &self.name_pos)
            .finish()
    }
}

impl Command {
    fn matches(&self, args: &[String]) -> bool {
        args.get(self.name_pos)
            .is_some_and(|arg| arg.eq_ignore_ascii_case(self.name))
    }

    fn write_usage(&self, out: &mut dyn Write) -> io::Result<()> {
        for line in self.usage {
            writeln!(out, "\tUsage:      {line}")?;
        }
        Ok(())
    }

    fn write_help(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "\t{:<12}{}", format!("{}:", self.name), self.help)?;
        self.write_usage(out)?;
        writeln!(out, "\tExample:    {}", self.example)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Invalid command option")]
    UnknownCommand,
    #[error("Invalid arguments number for {} command", .0.name)]
    ArgumentCount(&'static Command),
    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

impl DispatchError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::UnknownCommand => 1,
            Self::ArgumentCount(_) => 2,
            Self::Failed(_) => 1,
        }
    }
}

/// Converts the raw process arguments, rejecting any that is not valid UTF-8.
pub fn collect_args(
    args: impl IntoIterator<Item = OsString>,
) -> Result<Vec<String>, DispatchError> {
    args.into_iter()
        .map(|arg| {
            arg.into_string()
                .map_err(|arg| DispatchError::Failed(anyhow!("Invalid argument {arg:?}")))
        })
        .collect()
}

/// Runs the first command of [`COMMANDS`] whose name matches `args`.
///
/// `args[0]` is the program name. Unknown commands print the global usage,
/// argument count errors print the usage of the matched command.
pub fn dispatch(args: &[String], session: &mut Session) -> Result<(), DispatchError> {
    let Some(command) = COMMANDS.iter().find(|command| command.matches(args)) else {
        debug!("No command matches {:?}", args.get(1..).unwrap_or_default());
        if args.len() > 1 {
            writeln!(session.out, "{}", DispatchError::UnknownCommand)
                .context("Cannot write output")?;
        }
        write_usage(session.out).context("Cannot write output")?;
        return Err(DispatchError::UnknownCommand);
    };

    info!("Executing: {}", command.name);
    match (command.handler)(session, args) {
        Ok(()) => Ok(()),
        Err(CommandError::ArgumentCount) => {
            let error = DispatchError::ArgumentCount(command);
            writeln!(session.out, "{error}").context("Cannot write output")?;
            command
                .write_usage(session.out)
                .context("Cannot write output")?;
            Err(error)
        }
        Err(CommandError::Failed(error)) => Err(DispatchError::Failed(error)),
    }
}

fn write_usage(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "Usage:      {PROGRAM} -h <command>")?;
    for command in COMMANDS {
        command.write_usage(out)?;
    }
    Ok(())
}

fn checked<R, T>(parsed: Result<R, String>, what: &str, input: &str) -> Result<T>
where
    R: IntoChecked<T>,
{
    let raw = parsed.map_err(|e| anyhow!("Invalid {what} {input:?}: {e}"))?;
    Ok(raw.into_checked()?)
}

fn parse_stack(s: &str) -> Result<proto::StackId> {
    checked(clap_num::maybe_hex::<u8>(s), "stack level", s)
}

fn parse_channel(s: &str) -> Result<proto::Channel> {
    checked(clap_num::maybe_hex::<u8>(s), "RTD channel", s)
}

fn parse_group(s: &str) -> Result<proto::Group> {
    checked(clap_num::maybe_hex::<u8>(s), "sensor group", s)
}

fn parse_led_mode(s: &str) -> Result<proto::LedMode> {
    checked(clap_num::maybe_hex::<u8>(s), "LED mode", s)
}

fn parse_led_threshold(s: &str) -> Result<proto::LedThreshold> {
    checked(s.parse::<i16>().map_err(|e| e.to_string()), "LED threshold", s)
}

fn parse_sensor_type(s: &str) -> Result<proto::SensorType> {
    checked(clap_num::maybe_hex::<u8>(s), "sensor type", s)
}

fn parse_calibration(s: &str) -> Result<proto::CalibrationValue> {
    checked(s.parse::<f32>().map_err(|e| e.to_string()), "resistance", s)
}

fn parse_period(s: &str) -> Result<proto::WatchdogPeriod> {
    checked(clap_num::maybe_hex::<u16>(s), "watchdog period", s)
}

fn parse_off_period(s: &str) -> Result<proto::WatchdogOffPeriod> {
    checked(clap_num::maybe_hex::<u32>(s), "watchdog off period", s)
}

fn parse_sample_switch_count(s: &str) -> Result<proto::SampleSwitchCount> {
    checked(clap_num::maybe_hex::<u16>(s), "sample switch count", s)
}

fn open_board(session: &mut Session, stack: proto::StackId) -> Result<Board<Box<dyn RegisterBus>>> {
    Ok(Board::open(&mut *session.transport, stack)?)
}

fn do_help(session: &mut Session, args: &[String]) -> Result<(), CommandError> {
    match args {
        [_, _] => write_usage(session.out)?,
        [_, _, verb] => match COMMANDS.iter().find(|c| c.name.eq_ignore_ascii_case(verb)) {
            Some(command) => command.write_help(session.out)?,
            None => {
                writeln!(session.out, "Option \"{verb}\" not found")?;
                write_usage(session.out)?;
            }
        },
        _ => return Err(CommandError::ArgumentCount),
    }
    Ok(())
}

fn do_version(session: &mut Session, args: &[String]) -> Result<(), CommandError> {
    let [_, _] = args else {
        return Err(CommandError::ArgumentCount);
    };
    writeln!(session.out, "{PROGRAM} v{}", env!("CARGO_PKG_VERSION"))?;
    writeln!(session.out)?;
    writeln!(session.out, "This is free software with ABSOLUTELY NO WARRANTY.")?;
    writeln!(session.out, "For details type: {PROGRAM} -warranty")?;
    Ok(())
}

fn do_warranty(session: &mut Session, args: &[String]) -> Result<(), CommandError> {
    let [_, _] = args else {
        return Err(CommandError::ArgumentCount);
    };
    writeln!(session.out, "{WARRANTY}")?;
    Ok(())
}

fn do_list(session: &mut Session, args: &[String]) -> Result<(), CommandError> {
    let [_, _] = args else {
        return Err(CommandError::ArgumentCount);
    };
    let found = board::scan(&mut *session.transport).context("Cannot scan for RTD boards")?;
    writeln!(session.out, "{} board(s) detected", found.len())?;
    if !found.is_empty() {
        let ids: Vec<String> = found.iter().map(|stack| stack.to_string()).collect();
        writeln!(session.out, "Id: {}", ids.join(" "))?;
    }
    Ok(())
}

fn do_read(session: &mut Session, args: &[String]) -> Result<(), CommandError> {
    let [_, stack, _, channel] = args else {
        return Err(CommandError::ArgumentCount);
    };
    let stack = parse_stack(stack)?;
    let channel = parse_channel(channel)?;
    let value = open_board(session, stack)?
        .temperature(channel)
        .with_context(|| format!("Cannot read temperature of channel {channel}"))?;
    writeln!(session.out, "{value:.6}")?;
    Ok(())
}

fn do_read_resistance(session: &mut Session, args: &[String]) -> Result<(), CommandError> {
    let [_, stack, _, channel] = args else {
        return Err(CommandError::ArgumentCount);
    };
    let stack = parse_stack(stack)?;
    let channel = parse_channel(channel)?;
    let value = open_board(session, stack)?
        .resistance(channel)
        .with_context(|| format!("Cannot read resistance of channel {channel}"))?;
    writeln!(session.out, "{value:.6}")?;
    Ok(())
}

fn do_read_poly5(session: &mut Session, args: &[String]) -> Result<(), CommandError> {
    let [_, stack, _, channel] = args else {
        return Err(CommandError::ArgumentCount);
    };
    let stack = parse_stack(stack)?;
    let channel = parse_channel(channel)?;
    let value = open_board(session, stack)?
        .temperature_poly5(channel)
        .with_context(|| format!("Cannot read resistance of channel {channel}"))?;
    writeln!(session.out, "{value:.6}")?;
    Ok(())
}

fn do_calibrate(session: &mut Session, args: &[String]) -> Result<(), CommandError> {
    let [_, stack, _, channel, value] = args else {
        return Err(CommandError::ArgumentCount);
    };
    let stack = parse_stack(stack)?;
    let channel = parse_channel(channel)?;
    let value = parse_calibration(value)?;
    open_board(session, stack)?
        .calibrate(channel, value)
        .with_context(|| format!("Cannot calibrate channel {channel}"))?;
    Ok(())
}

fn do_calibration_reset(session: &mut Session, args: &[String]) -> Result<(), CommandError> {
    let [_, stack, _, channel] = args else {
        return Err(CommandError::ArgumentCount);
    };
    let stack = parse_stack(stack)?;
    let channel = parse_channel(channel)?;
    open_board(session, stack)?
        .reset_calibration(channel)
        .with_context(|| format!("Cannot reset calibration of channel {channel}"))?;
    Ok(())
}

fn do_board(session: &mut Session, args: &[String]) -> Result<(), CommandError> {
    let [_, stack, _] = args else {
        return Err(CommandError::ArgumentCount);
    };
    let stack = parse_stack(stack)?;
    let mut board = open_board(session, stack)?;
    let firmware = board
        .firmware_revision()
        .context("Cannot read firmware version")?;
    let hardware = board
        .hardware_revision()
        .context("Cannot read hardware version")?;
    let diagnostics = board.diagnostics().context("Cannot read diagnostics")?;
    writeln!(
        session.out,
        "RTD board firmware version {firmware}, hardware version {hardware}"
    )?;
    writeln!(session.out, "{diagnostics}")?;
    Ok(())
}

fn do_led_mode_read(session: &mut Session, args: &[String]) -> Result<(), CommandError> {
    let [_, stack, _, channel] = args else {
        return Err(CommandError::ArgumentCount);
    };
    let stack = parse_stack(stack)?;
    let channel = parse_channel(channel)?;
    let mode = open_board(session, stack)?
        .led_mode(channel)
        .with_context(|| format!("Cannot read LED mode of channel {channel}"))?;
    writeln!(session.out, "{mode}")?;
    Ok(())
}

fn do_led_mode_write(session: &mut Session, args: &[String]) -> Result<(), CommandError> {
    let [_, stack, _, channel, mode] = args else {
        return Err(CommandError::ArgumentCount);
    };
    let stack = parse_stack(stack)?;
    let channel = parse_channel(channel)?;
    let mode = parse_led_mode(mode)?;
    open_board(session, stack)?
        .set_led_mode(channel, mode)
        .with_context(|| format!("Cannot write LED mode of channel {channel}"))?;
    Ok(())
}

fn do_led_threshold_read(session: &mut Session, args: &[String]) -> Result<(), CommandError> {
    let [_, stack, _, channel] = args else {
        return Err(CommandError::ArgumentCount);
    };
    let stack = parse_stack(stack)?;
    let channel = parse_channel(channel)?;
    let threshold = open_board(session, stack)?
        .led_threshold(channel)
        .with_context(|| format!("Cannot read LED threshold of channel {channel}"))?;
    writeln!(session.out, "{threshold}")?;
    Ok(())
}

fn do_led_threshold_write(session: &mut Session, args: &[String]) -> Result<(), CommandError> {
    let [_, stack, _, channel, threshold] = args else {
        return Err(CommandError::ArgumentCount);
    };
    let stack = parse_stack(stack)?;
    let channel = parse_channel(channel)?;
    let threshold = parse_led_threshold(threshold)?;
    open_board(session, stack)?
        .set_led_threshold(channel, threshold)
        .with_context(|| format!("Cannot write LED threshold of channel {channel}"))?;
    Ok(())
}

fn do_sensor_type_read(session: &mut Session, args: &[String]) -> Result<(), CommandError> {
    let [_, stack, _, group] = args else {
        return Err(CommandError::ArgumentCount);
    };
    let stack = parse_stack(stack)?;
    let group = parse_group(group)?;
    let sensor_type = open_board(session, stack)?
        .sensor_type(group)
        .with_context(|| format!("Cannot read sensor type of group {group}"))?;
    writeln!(session.out, "{sensor_type}")?;
    Ok(())
}

fn do_sensor_type_write(session: &mut Session, args: &[String]) -> Result<(), CommandError> {
    let [_, stack, _, group, sensor_type] = args else {
        return Err(CommandError::ArgumentCount);
    };
    let stack = parse_stack(stack)?;
    let group = parse_group(group)?;
    let sensor_type = parse_sensor_type(sensor_type)?;
    open_board(session, stack)?
        .set_sensor_type(group, sensor_type)
        .with_context(|| format!("Cannot write sensor type of group {group}"))?;
    Ok(())
}

fn do_sample_switch_read(session: &mut Session, args: &[String]) -> Result<(), CommandError> {
    let [_, stack, _] = args else {
        return Err(CommandError::ArgumentCount);
    };
    let stack = parse_stack(stack)?;
    let count = open_board(session, stack)?
        .sample_switch_count()
        .context("Cannot read sample switch count")?;
    writeln!(session.out, "{count}")?;
    Ok(())
}

fn do_sample_switch_write(session: &mut Session, args: &[String]) -> Result<(), CommandError> {
    let [_, stack, _, count] = args else {
        return Err(CommandError::ArgumentCount);
    };
    let stack = parse_stack(stack)?;
    let count = parse_sample_switch_count(count)?;
    open_board(session, stack)?
        .set_sample_switch_count(count)
        .with_context(|| format!("Cannot write sample switch count {count}"))?;
    Ok(())
}

fn do_wdt_reload(session: &mut Session, args: &[String]) -> Result<(), CommandError> {
    let [_, stack, _] = args else {
        return Err(CommandError::ArgumentCount);
    };
    let stack = parse_stack(stack)?;
    open_board(session, stack)?
        .reload_watchdog()
        .context("Cannot reload watchdog")?;
    Ok(())
}

fn do_wdt_period_write(session: &mut Session, args: &[String]) -> Result<(), CommandError> {
    let [_, stack, _, period] = args else {
        return Err(CommandError::ArgumentCount);
    };
    let stack = parse_stack(stack)?;
    let period = parse_period(period)?;
    open_board(session, stack)?
        .set_watchdog_period(period)
        .with_context(|| format!("Cannot write watchdog period {period}"))?;
    Ok(())
}

fn do_wdt_period_read(session: &mut Session, args: &[String]) -> Result<(), CommandError> {
    let [_, stack, _] = args else {
        return Err(CommandError::ArgumentCount);
    };
    let stack = parse_stack(stack)?;
    let period = open_board(session, stack)?
        .watchdog_period()
        .context("Cannot read watchdog period")?;
    writeln!(session.out, "{period}")?;
    Ok(())
}

fn do_wdt_init_period_write(session: &mut Session, args: &[String]) -> Result<(), CommandError> {
    let [_, stack, _, period] = args else {
        return Err(CommandError::ArgumentCount);
    };
    let stack = parse_stack(stack)?;
    let period = parse_period(period)?;
    open_board(session, stack)?
        .set_watchdog_init_period(period)
        .with_context(|| format!("Cannot write watchdog initial period {period}"))?;
    Ok(())
}

fn do_wdt_init_period_read(session: &mut Session, args: &[String]) -> Result<(), CommandError> {
    let [_, stack, _] = args else {
        return Err(CommandError::ArgumentCount);
    };
    let stack = parse_stack(stack)?;
    let period = open_board(session, stack)?
        .watchdog_init_period()
        .context("Cannot read watchdog initial period")?;
    writeln!(session.out, "{period}")?;
    Ok(())
}

fn do_wdt_off_period_write(session: &mut Session, args: &[String]) -> Result<(), CommandError> {
    let [_, stack, _, period] = args else {
        return Err(CommandError::ArgumentCount);
    };
    let stack = parse_stack(stack)?;
    let period = parse_off_period(period)?;
    open_board(session, stack)?
        .set_watchdog_off_period(period)
        .with_context(|| format!("Cannot write watchdog off period {period}"))?;
    Ok(())
}

fn do_wdt_off_period_read(session: &mut Session, args: &[String]) -> Result<(), CommandError> {
    let [_, stack, _] = args else {
        return Err(CommandError::ArgumentCount);
    };
    let stack = parse_stack(stack)?;
    let period = open_board(session, stack)?
        .watchdog_off_period()
        .context("Cannot read watchdog off period")?;
    writeln!(session.out, "{period}")?;
    Ok(())
}

fn do_wdt_reset_count_read(session: &mut Session, args: &[String]) -> Result<(), CommandError> {
    let [_, stack, _] = args else {
        return Err(CommandError::ArgumentCount);
    };
    let stack = parse_stack(stack)?;
    let count = open_board(session, stack)?
        .watchdog_reset_count()
        .context("Cannot read watchdog reset count")?;
    writeln!(session.out, "{count}")?;
    Ok(())
}

fn do_wdt_reset_count_clear(session: &mut Session, args: &[String]) -> Result<(), CommandError> {
    let [_, stack, _] = args else {
        return Err(CommandError::ArgumentCount);
    };
    let stack = parse_stack(stack)?;
    open_board(session, stack)?
        .clear_watchdog_reset_count()
        .context("Cannot clear watchdog reset count")?;
    Ok(())
}

/// Every command, in matching and usage order.
pub static COMMANDS: &[Command] = &[
    Command {
        name: "-h",
        name_pos: 1,
        handler: do_help,
        help: "Display the list of command options or one command option details",
        usage: &[
            "rtd -h    Display command options list",
            "rtd -h <param>   Display help for <param> command option",
        ],
        example: "rtd -h read    Display help for \"read\" command option",
    },
    Command {
        name: "-v",
        name_pos: 1,
        handler: do_version,
        help: "Display the version number",
        usage: &["rtd -v"],
        example: "rtd -v  Display the version number",
    },
    Command {
        name: "-warranty",
        name_pos: 1,
        handler: do_warranty,
        help: "Display the warranty",
        usage: &["rtd -warranty"],
        example: "rtd -warranty  Display the warranty text",
    },
    Command {
        name: "-list",
        name_pos: 1,
        handler: do_list,
        help: "List all rtd boards connected, return nr of boards and stack level for every board",
        usage: &["rtd -list"],
        example: "rtd -list display: 1 board(s) detected, Id: 0",
    },
    Command {
        name: "read",
        name_pos: 2,
        handler: do_read,
        help: "Read rtd channel temperature",
        usage: &["rtd <id> read <channel>"],
        example: "rtd 0 read 2; Read the temperature on channel #2 on Board #0",
    },
    Command {
        name: "readres",
        name_pos: 2,
        handler: do_read_resistance,
        help: "Read rtd channel resistance in Ohm",
        usage: &["rtd <id> readres <channel>"],
        example: "rtd 0 readres 2; Read the resistance on channel #2 on Board #0",
    },
    Command {
        name: "readpoly5",
        name_pos: 2,
        handler: do_read_poly5,
        help: "Read rtd channel temperature computed from its resistance with a 5th order polynomial",
        usage: &["rtd <id> readpoly5 <channel>"],
        example: "rtd 0 readpoly5 2; Read the temperature on channel #2 on Board #0",
    },
    Command {
        name: "cal",
        name_pos: 2,
        handler: do_calibrate,
        help: "Calibrate one rtd channel with the reference resistance in Ohm [0, 4000] applied to its input, two points needed",
        usage: &["rtd <id> cal <channel> <value>"],
        example: "rtd 0 cal 1 100; Store a 100 Ohm calibration point for channel #1 on Board #0",
    },
    Command {
        name: "calrst",
        name_pos: 2,
        handler: do_calibration_reset,
        help: "Reset the calibration of one rtd channel to factory default",
        usage: &["rtd <id> calrst <channel>"],
        example: "rtd 0 calrst 1; Reset the calibration of channel #1 on Board #0",
    },
    Command {
        name: "board",
        name_pos: 2,
        handler: do_board,
        help: "Display board firmware and hardware version, cpu temperature and power supply voltage",
        usage: &["rtd <id> board"],
        example: "rtd 0 board",
    },
    Command {
        name: "ledmrd",
        name_pos: 2,
        handler: do_led_mode_read,
        help: "Read rtd led's mode: off<0>; low<1> (turn on if temperature above threshold); high<2> (turn on if temperature below threshold)",
        usage: &["rtd <id> ledmrd <channel>"],
        example: "rtd 0 ledmrd 2; Read the led mode on channel #2 on Board #0",
    },
    Command {
        name: "ledmwr",
        name_pos: 2,
        handler: do_led_mode_write,
        help: "Write rtd led's mode: off<0>; low<1> (turn on if temperature above threshold); high<2> (turn on if temperature below threshold)",
        usage: &["rtd <id> ledmwr <channel> <value>"],
        example: "rtd 0 ledmwr 2 1; Write the led mode on channel #2 on Board #0 to low",
    },
    Command {
        name: "ledthrd",
        name_pos: 2,
        handler: do_led_threshold_read,
        help: "Read rtd led's threshold value in deg C [-200, 300]",
        usage: &["rtd <id> ledthrd <channel>"],
        example: "rtd 0 ledthrd 2; Read the led threshold on channel #2 on Board #0",
    },
    Command {
        name: "ledthwr",
        name_pos: 2,
        handler: do_led_threshold_write,
        help: "Write rtd led's threshold value in deg C [-200, 300]",
        usage: &["rtd <id> ledthwr <channel> <value>"],
        example: "rtd 0 ledthwr 2 10; Write the led threshold on channel #2 on Board #0 to 10 deg C",
    },
    Command {
        name: "styperd",
        name_pos: 2,
        handler: do_sensor_type_read,
        help: "Read the sensor type of a channel group: PT100<0>; PT1000<1>. Group 1 is channels 1-4, group 2 is channels 5-8",
        usage: &["rtd <id> styperd <group>"],
        example: "rtd 0 styperd 1; Read the sensor type of channels 1-4 on Board #0",
    },
    Command {
        name: "stypewr",
        name_pos: 2,
        handler: do_sensor_type_write,
        help: "Write the sensor type of a channel group: PT100<0>; PT1000<1>. Group 1 is channels 1-4, group 2 is channels 5-8",
        usage: &["rtd <id> stypewr <group> <value>"],
        example: "rtd 0 stypewr 2 1; Set channels 5-8 on Board #0 to PT1000",
    },
    Command {
        name: "swsrd",
        name_pos: 2,
        handler: do_sample_switch_read,
        help: "Read the number of samples taken on a channel before switching to the next one",
        usage: &["rtd <id> swsrd"],
        example: "rtd 0 swsrd; Read the sample switch count on Board #0",
    },
    Command {
        name: "swswr",
        name_pos: 2,
        handler: do_sample_switch_write,
        help: "Write the number of samples taken on a channel before switching to the next one [1, 10000]",
        usage: &["rtd <id> swswr <value>"],
        example: "rtd 0 swswr 20; Switch channels every 20 samples on Board #0",
    },
    Command {
        name: "wdtr",
        name_pos: 2,
        handler: do_wdt_reload,
        help: "Reload the watchdog timer and enable the watchdog if is disabled",
        usage: &["rtd <id> wdtr"],
        example: "rtd 0 wdtr; Reload the watchdog timer on Board #0 with the period",
    },
    Command {
        name: "wdtpwr",
        name_pos: 2,
        handler: do_wdt_period_write,
        help: "Set the watchdog period in seconds, reload command must be issue in this interval to prevent Raspberry Pi power off",
        usage: &["rtd <id> wdtpwr <val>"],
        example: "rtd 0 wdtpwr 10; Set the watchdog timer period on Board #0 at 10 seconds",
    },
    Command {
        name: "wdtprd",
        name_pos: 2,
        handler: do_wdt_period_read,
        help: "Get the watchdog period in seconds, reload command must be issue in this interval to prevent Raspberry Pi power off",
        usage: &["rtd <id> wdtprd"],
        example: "rtd 0 wdtprd; Get the watchdog timer period on Board #0",
    },
    Command {
        name: "wdtipwr",
        name_pos: 2,
        handler: do_wdt_init_period_write,
        help: "Set the watchdog initial period in seconds, This period is loaded after power cycle, giving Raspberry time to boot",
        usage: &["rtd <id> wdtipwr <val>"],
        example: "rtd 0 wdtipwr 10; Set the watchdog timer initial period on Board #0 at 10 seconds",
    },
    Command {
        name: "wdtiprd",
        name_pos: 2,
        handler: do_wdt_init_period_read,
        help: "Get the watchdog initial period in seconds. This period is loaded after power cycle, giving Raspberry time to boot",
        usage: &["rtd <id> wdtiprd"],
        example: "rtd 0 wdtiprd; Get the watchdog timer initial period on Board #0",
    },
    Command {
        name: "wdtopwr",
        name_pos: 2,
        handler: do_wdt_off_period_write,
        help: "Set the watchdog off period in seconds (max 48 days), This is the time that watchdog mantain Raspberry turned off",
        usage: &["rtd <id> wdtopwr <val>"],
        example: "rtd 0 wdtopwr 10; Set the watchdog off interval on Board #0 at 10 seconds",
    },
    Command {
        name: "wdtoprd",
        name_pos: 2,
        handler: do_wdt_off_period_read,
        help: "Get the watchdog off period in seconds (max 48 days), This is the time that watchdog mantain Raspberry turned off",
        usage: &["rtd <id> wdtoprd"],
        example: "rtd 0 wdtoprd; Get the watchdog off period on Board #0",
    },
    Command {
        name: "wdtrcrd",
        name_pos: 2,
        handler: do_wdt_reset_count_read,
        help: "Get the number of times the watchdog has power cycled the Raspberry Pi",
        usage: &["rtd <id> wdtrcrd"],
        example: "rtd 0 wdtrcrd; Get the watchdog reset count on Board #0",
    },
    Command {
        name: "wdtrcclr",
        name_pos: 2,
        handler: do_wdt_reset_count_clear,
        help: "Clear the watchdog reset count",
        usage: &["rtd <id> wdtrcclr"],
        example: "rtd 0 wdtrcclr; Clear the watchdog reset count on Board #0",
    },
];
