use crate::console::Console;
use crate::session::input::InputSource;
use crate::session::models::BuildError;
use crate::ticket::{
    parse_discount, parse_height, parse_name, parse_passport_id, parse_price, parse_ticket_type,
    parse_x, parse_y, Coordinates, Field, Person, TicketPayload, TicketType, MAX_DISCOUNT,
    MAX_Y, MIN_X,
};

/// Reads ticket fields from the current input source.
///
/// Interactively, a bad value is reported and asked again. Inside a script
/// there is nobody to correct it, so the first bad value fails the build.
pub struct ObjectBuilder<'a> {
    source: &'a mut InputSource,
    console: &'a Console,
    scripted: bool,
}

impl<'a> ObjectBuilder<'a> {
    pub fn new(source: &'a mut InputSource, console: &'a Console) -> Self {
        let scripted = source.is_scripted();
        Self {
            source,
            console,
            scripted,
        }
    }

    pub fn build_for_create(&mut self) -> Result<TicketPayload, BuildError> {
        Ok(TicketPayload {
            name: Field::Set(self.name()?),
            coordinates: Field::Set(self.coordinates()?),
            price: Field::Set(self.price()?),
            ticket_type: Field::Set(self.ticket_type()?),
            person: Field::Set(self.person()?),
            discount: Field::Set(self.discount()?),
        })
    }

    /// Ask about every field first; declined fields stay [`Field::Unset`].
    pub fn build_for_update(&mut self) -> Result<TicketPayload, BuildError> {
        let name = self.optional("name", Self::name)?;
        let coordinates = self.optional("coordinates", Self::coordinates)?;
        let price = self.optional("price", Self::price)?;
        let discount = self.optional("discount", Self::discount)?;
        let ticket_type = self.optional("ticket type", Self::ticket_type)?;
        let person = self.optional("person", Self::person)?;
        Ok(TicketPayload {
            name,
            coordinates,
            price,
            ticket_type,
            person,
            discount,
        })
    }

    fn optional<T>(
        &mut self,
        label: &str,
        read: fn(&mut Self) -> Result<T, BuildError>,
    ) -> Result<Field<T>, BuildError> {
        let prompt = format!("change the {}? [yes/no]: ", label);
        if self.ask("answer", &prompt, parse_yes_no)? {
            Ok(Field::Set(read(self)?))
        } else {
            Ok(Field::Unset)
        }
    }

    fn name(&mut self) -> Result<String, BuildError> {
        self.ask("name", "enter ticket name: ", parse_name)
    }

    fn coordinates(&mut self) -> Result<Coordinates, BuildError> {
        let x = self.ask("x", &format!("enter x coordinate (> {}): ", MIN_X), parse_x)?;
        let y = self.ask("y", &format!("enter y coordinate (<= {}): ", MAX_Y), parse_y)?;
        Ok(Coordinates { x, y })
    }

    fn price(&mut self) -> Result<f64, BuildError> {
        self.ask("price", "enter price (> 0): ", parse_price)
    }

    fn ticket_type(&mut self) -> Result<TicketType, BuildError> {
        let prompt = format!("enter ticket type ({}): ", TicketType::listing());
        self.ask("ticket type", &prompt, parse_ticket_type)
    }

    fn person(&mut self) -> Result<Person, BuildError> {
        let height = self.ask("height", "enter person height (> 0): ", parse_height)?;
        let passport_id = self.ask(
            "passport id",
            "enter passport id (7-50 letters or digits): ",
            parse_passport_id,
        )?;
        Ok(Person {
            height,
            passport_id,
        })
    }

    fn discount(&mut self) -> Result<i64, BuildError> {
        let prompt = format!("enter discount (1-{}): ", MAX_DISCOUNT);
        self.ask("discount", &prompt, parse_discount)
    }

    fn ask<T>(
        &mut self,
        field: &'static str,
        prompt: &str,
        parse: impl Fn(&str) -> Result<T, String>,
    ) -> Result<T, BuildError> {
        loop {
            let line = self.source.read_field_line(prompt)?;
            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(reason) if self.scripted => {
                    return Err(BuildError::InvalidInScript { field, reason })
                }
                Err(reason) => self.console.error(&reason),
            }
        }
    }
}

fn parse_yes_no(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" => Ok(true),
        "no" | "n" => Ok(false),
        other => Err(format!("answer 'yes' or 'no', got '{}'", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::input::ScriptFrame;
    use crate::session::models::InputError;
    use std::io::Cursor;

    const CREATE_LINES: &str = "Concert\n10.5\n-3\n19.99\nvip\n180\nAB1234567\n15\n";

    fn source(input: &str) -> InputSource {
        InputSource::new(Box::new(Cursor::new(input.to_string())), Console::plain())
    }

    fn expected_ticket() -> TicketPayload {
        TicketPayload {
            name: Field::Set("Concert".into()),
            coordinates: Field::Set(Coordinates { x: 10.5, y: -3 }),
            price: Field::Set(19.99),
            ticket_type: Field::Set(TicketType::Vip),
            person: Field::Set(Person {
                height: 180.0,
                passport_id: "AB1234567".into(),
            }),
            discount: Field::Set(15),
        }
    }

    #[test]
    fn create_reads_all_six_fields() {
        let mut src = source(CREATE_LINES);
        let console = Console::plain();
        let ticket = ObjectBuilder::new(&mut src, &console)
            .build_for_create()
            .unwrap();
        assert!(ticket.is_complete());
        assert_eq!(ticket, expected_ticket());
    }

    #[test]
    fn create_reprompts_on_bad_interactive_values() {
        let input = "\nConcert\nabc\n10.5\n-3\n0\n19.99\npremium\nvip\n180\nshort\nAB1234567\n500\n15\n";
        let mut src = source(input);
        let console = Console::plain();
        let ticket = ObjectBuilder::new(&mut src, &console)
            .build_for_create()
            .unwrap();
        assert_eq!(ticket, expected_ticket());
    }

    #[test]
    fn update_declining_everything_leaves_all_unset() {
        let mut src = source("no\nn\nno\nNO\nno\nno\n");
        let console = Console::plain();
        let ticket = ObjectBuilder::new(&mut src, &console)
            .build_for_update()
            .unwrap();
        assert_eq!(ticket, TicketPayload::default());
        assert_eq!(ticket.set_count(), 0);
    }

    #[test]
    fn update_accepting_everything_matches_create() {
        // Update order: name, coordinates, price, discount, type, person.
        let input = "yes\nConcert\ny\n10.5\n-3\nyes\n19.99\nyes\n15\nyes\nvip\nyes\n180\nAB1234567\n";
        let mut src = source(input);
        let console = Console::plain();
        let ticket = ObjectBuilder::new(&mut src, &console)
            .build_for_update()
            .unwrap();
        assert_eq!(ticket, expected_ticket());
    }

    #[test]
    fn update_with_only_price_sets_only_price() {
        let mut src = source("no\nno\nyes\n19.99\nno\nno\nno\n");
        let console = Console::plain();
        let ticket = ObjectBuilder::new(&mut src, &console)
            .build_for_update()
            .unwrap();
        assert_eq!(ticket.price, Field::Set(19.99));
        assert_eq!(ticket.set_count(), 1);
    }

    #[test]
    fn update_reasks_unclear_answers() {
        let mut src = source("maybe\nno\nno\nno\nno\nno\nno\n");
        let console = Console::plain();
        let ticket = ObjectBuilder::new(&mut src, &console)
            .build_for_update()
            .unwrap();
        assert_eq!(ticket.set_count(), 0);
    }

    #[test]
    fn bad_value_in_script_fails_the_build() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        std::fs::write(&path, "Concert\n10.5\n-3\n-1\n").unwrap();
        let mut src = source("");
        src.push_script(ScriptFrame::open(path, "bad.txt").unwrap());
        let console = Console::plain();
        let err = ObjectBuilder::new(&mut src, &console)
            .build_for_create()
            .unwrap_err();
        match err {
            BuildError::InvalidInScript { field, .. } => assert_eq!(field, "price"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn closed_terminal_stops_the_build() {
        let mut src = source("Concert\n");
        let console = Console::plain();
        let err = ObjectBuilder::new(&mut src, &console)
            .build_for_create()
            .unwrap_err();
        assert!(matches!(err, BuildError::Input(InputError::Closed)));
    }
}
