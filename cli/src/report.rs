use stimlog_core::{
    category_counts, field_stats, hour_views, setting_counts, summarize, Day, Field, FieldStats,
    HourMap, LogError, Setting,
};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct HourRow {
    #[tabled(rename = "Hour")]
    hour: usize,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Record")]
    description: String,
}

#[derive(Tabled)]
struct CountRow {
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Hours")]
    hours: usize,
}

#[derive(Tabled)]
struct DayRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Recorded")]
    recorded: usize,
    #[tabled(rename = "Asleep")]
    asleep: usize,
    #[tabled(rename = "Pain (min/max/avg)")]
    pain: String,
}

fn print_table<T: Tabled>(rows: Vec<T>) {
    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN)); // Header color
    println!("{}", table);
}

fn heading(text: String) {
    println!("\x1b[1;36m{}\x1b[0m", text);
}

fn window(start: usize, end: usize) -> String {
    if start == 0 && end == 23 {
        String::new()
    } else {
        format!(" between hours {} and {}", start, end)
    }
}

fn format_stats(stats: &FieldStats) -> String {
    format!("{}/{}/{:.2}", stats.min, stats.max, stats.avg)
}

pub fn show_hours(day: &Day, hours: &HourMap) {
    heading(format!("* Records for {} *", day.date().format("%Y-%m-%d (%a)")));
    let rows = hour_views(hours)
        .into_iter()
        .map(|v| HourRow {
            hour: v.hour,
            period: v.period,
            description: v.description,
        })
        .collect();
    print_table::<HourRow>(rows);
}

pub fn show_field_stats(day: &Day, field: Field, start: usize, end: usize, hours: &HourMap) {
    heading(format!("* {} levels on {}{} *", field, day.date(), window(start, end)));
    match field_stats(field, hours) {
        Ok(stats) => {
            println!("Min: {}", stats.min);
            println!("Max: {}", stats.max);
            println!("Avg: {:.2}", stats.avg);
        }
        Err(LogError::NoData { field }) => {
            if field == Field::Pain {
                println!("No pain data (no awake hours recorded).");
            } else {
                println!("No {} data recorded.", field);
            }
        }
        Err(e) => println!("Error: {}", e),
    }
}

pub fn show_summary(day: &Day, start: usize, end: usize, hours: &HourMap) {
    heading(format!("* Summary for {}{} *", day.date(), window(start, end)));
    let summary = summarize(hours);
    let or_none = |s: Option<FieldStats>| s.as_ref().map(format_stats).unwrap_or_else(|| "-".to_string());

    println!("Recorded hours: {}", summary.recorded_hours);
    println!("Hours awake:    {}", summary.sleep.hours_awake);
    println!("Hours asleep:   {}", summary.sleep.hours_asleep);
    println!("Pain     (min/max/avg): {}", or_none(summary.pain));
    println!("Program  (min/max/avg): {}", or_none(summary.program));
    println!("Strength (min/max/avg): {}", or_none(summary.strength));

    let settings = setting_counts(hours);
    if !settings.is_empty() {
        let rows = settings
            .into_iter()
            .map(|((program, strength), hours)| CountRow {
                value: setting_label(program, strength),
                hours,
            })
            .collect();
        print_table::<CountRow>(rows);
    }
}

fn setting_label(program: u8, strength: u8) -> String {
    if program == 0 {
        "OFF".to_string()
    } else {
        format!("Program {} / Strength {}", program, strength)
    }
}

pub fn show_counts(day: &Day, setting: Setting) {
    heading(format!("* {} hours on {} *", setting, day.date()));
    let counts = category_counts(setting, &day.get_all_hours());
    if counts.is_empty() {
        println!("No records for this day.");
        return;
    }
    let rows = counts
        .into_iter()
        .map(|(value, hours)| CountRow {
            value: match (setting, value) {
                (Setting::Program, 0) => "OFF".to_string(),
                _ => value.to_string(),
            },
            hours,
        })
        .collect();
    print_table::<CountRow>(rows);
}

pub fn show_days(days: &[Day]) {
    if days.is_empty() {
        println!("No days recorded yet.");
        return;
    }
    let rows = days
        .iter()
        .map(|day| {
            let summary = summarize(&day.get_all_hours());
            DayRow {
                date: day.date().format("%Y-%m-%d (%a)").to_string(),
                recorded: summary.recorded_hours,
                asleep: summary.sleep.hours_asleep,
                pain: summary.pain.as_ref().map(format_stats).unwrap_or_else(|| "-".to_string()),
            }
        })
        .collect();
    print_table::<DayRow>(rows);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_text() {
        assert_eq!(window(0, 23), "");
        assert_eq!(window(5, 8), " between hours 5 and 8");
    }

    #[test]
    fn test_labels() {
        assert_eq!(setting_label(0, 9), "OFF");
        assert_eq!(setting_label(2, 7), "Program 2 / Strength 7");
        assert_eq!(format_stats(&FieldStats { min: 1, max: 9, avg: 4.5 }), "1/9/4.50");
    }
}
