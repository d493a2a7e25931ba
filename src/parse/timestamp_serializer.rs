use crate::model::timestamp::Timestamp;

/// Render a timestamp in field order:
/// `bracket year-month-day [dayName] [start[-end]] [repeater] [delay] bracket`,
/// with the delay ahead of the repeater when it was written there
pub fn render_timestamp(ts: &Timestamp) -> String {
    let mut out = String::new();
    out.push(if ts.is_active { '<' } else { '[' });
    out.push_str(&format!("{}-{}-{}", ts.year, ts.month, ts.day));

    if let Some(ref day_name) = ts.day_name {
        out.push(' ');
        out.push_str(day_name);
    }

    if let Some(ref start) = ts.start {
        out.push_str(&format!(" {}:{}", start.hour, start.minute));
        if let Some(ref end) = ts.end {
            out.push_str(&format!("-{}:{}", end.hour, end.minute));
        }
    }

    if ts.delay_first {
        push_delay(&mut out, ts);
    }

    if let Some(ref repeater) = ts.repeater {
        out.push_str(&format!(
            " {}{}{}",
            repeater.kind.as_str(),
            repeater.value,
            repeater.unit.as_char()
        ));
        if let Some((value, unit)) = &repeater.deadline {
            out.push_str(&format!("/{}{}", value, unit.as_char()));
        }
    }

    if !ts.delay_first {
        push_delay(&mut out, ts);
    }

    out.push(if ts.is_active { '>' } else { ']' });
    out
}

fn push_delay(out: &mut String, ts: &Timestamp) {
    if let Some(ref delay) = ts.delay {
        out.push_str(&format!(
            " {}{}{}",
            delay.kind.as_str(),
            delay.value,
            delay.unit.as_char()
        ));
    }
}

/// Render `first`, or `first--second` for a range
pub fn render_timestamp_range(first: &Timestamp, second: Option<&Timestamp>) -> String {
    match second {
        Some(second) => format!("{}--{}", render_timestamp(first), render_timestamp(second)),
        None => render_timestamp(first),
    }
}
