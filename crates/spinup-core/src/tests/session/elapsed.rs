use crate::{ElapsedTime, format_time};

/// WHAT: Zero seconds formats as all zeros
/// WHY: A freshly mounted session view shows 00:00:00
#[test]
fn given_zero_seconds_when_formatting_then_all_components_zero() {
    // Given/When: Formatting zero seconds
    let time = format_time(0);

    // Then: Every component is zero and padded
    assert_eq!(
        time,
        ElapsedTime {
            hours: 0,
            minutes: 0,
            seconds: 0
        }
    );
    assert_eq!(time.to_string(), "00:00:00");
}

/// WHAT: Hour, minute and second boundaries split correctly
/// WHY: Components come from division and modulo by 3600 and 60
#[test]
fn given_boundary_values_when_formatting_then_components_split_correctly() {
    // Given: Values straddling each unit boundary
    let cases = [
        (59, (0, 0, 59), "00:00:59"),
        (60, (0, 1, 0), "00:01:00"),
        (3600, (1, 0, 0), "01:00:00"),
        (3661, (1, 1, 1), "01:01:01"),
        (86_399, (23, 59, 59), "23:59:59"),
    ];

    for (seconds, (hours, minutes, secs), text) in cases {
        // When: Formatting
        let time = format_time(seconds);

        // Then: Components and text match
        assert_eq!(
            (time.hours, time.minutes, time.seconds),
            (hours, minutes, secs),
            "components for {seconds}"
        );
        assert_eq!(time.to_string(), text, "text for {seconds}");
    }
}

/// WHAT: Hours past 99 are not wrapped
/// WHY: The hours field grows wider instead of rolling over
#[test]
fn given_more_than_99_hours_when_formatting_then_hours_grow_unbounded() {
    // Given: 100 hours, 2 minutes and 3 seconds
    let seconds = 100 * 3600 + 2 * 60 + 3;

    // When: Formatting
    let time = format_time(seconds);

    // Then: Hours print in full
    assert_eq!(time.hours, 100);
    assert_eq!(time.to_string(), "100:02:03");
}
