use crate::entities::{announcement, author, heading};

use super::mailer::OutgoingMail;

/// Builds the HTML notification one subscriber receives for one announcement.
pub fn render(
    to: &str,
    subscriber: &author::Model,
    announcement: &announcement::Model,
    heading: &heading::Model,
) -> OutgoingMail {
    let html = format!(
        "<html><body>\
         <p>Hello, {first} {last}!</p>\
         <p>A new announcement matches your subscription in <b>{heading}</b>:</p>\
         <h2>{name}</h2>\
         <p>{text}</p>\
         <p>Cost: {cost:.2}</p>\
         </body></html>",
        first = escape(&subscriber.name),
        last = escape(&subscriber.last_name),
        heading = escape(&heading.name),
        name = escape(&announcement.name),
        text = escape(&announcement.text),
        cost = announcement.cost,
    );

    OutgoingMail {
        to: to.to_string(),
        subject: format!("New suitable announcement: {}", announcement.name),
        html,
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn contains_name_text_and_cost() {
        let subscriber = author::Model {
            id: 1,
            name: "alice".into(),
            last_name: "Smith".into(),
            password: String::new(),
            active: true,
            version: 0,
        };
        let announcement = announcement::Model {
            id: 5,
            name: "Bicycle".into(),
            text: "Red <city> bike".into(),
            creation_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            active: true,
            cost: 120.5,
            heading_id: 2,
            author_id: 3,
            version: 0,
        };
        let heading = heading::Model {
            id: 2,
            name: "Bikes".into(),
            version: 0,
        };

        let mail = render("alice@example.com", &subscriber, &announcement, &heading);

        assert_eq!(mail.to, "alice@example.com");
        assert_eq!(mail.subject, "New suitable announcement: Bicycle");
        assert!(mail.html.contains("<h2>Bicycle</h2>"));
        assert!(mail.html.contains("Red &lt;city&gt; bike"));
        assert!(mail.html.contains("Cost: 120.50"));
        assert!(mail.html.contains("<b>Bikes</b>"));
    }
}
