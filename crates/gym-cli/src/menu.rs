//! The interactive main menu and its five screens.
//!
//! Every screen runs to completion and returns to the main menu; errors
//! from roster operations are shown to the operator, never propagated.
//! Only terminal I/O errors end the loop early. End of input at a
//! sub-prompt abandons that screen; at the main prompt it exits.

use std::io::{self, BufRead, Write};

use gym_core::roster::{
    self, RosterError, SearchOutcome, UpdateAction, add_member, expired_members, find_member,
    list_members, search_members, update_member,
};
use gym_db::MemberStore;

use crate::clock::Clock;
use crate::console::Console;
use crate::render;

const PLAN_CHOICES: &str = "Membership type: 1) Monthly  2) Quarterly  3) Yearly";
const PLAN_PROMPT: &str = "Choose (1/2/3) or type name: ";

/// Main-menu state: the roster and who is running it.
pub struct Menu<C> {
    store: MemberStore,
    owner: String,
    clock: C,
}

impl<C: Clock> Menu<C> {
    pub fn new(store: MemberStore, owner: impl Into<String>, clock: C) -> Self {
        Self {
            store,
            owner: owner.into(),
            clock,
        }
    }

    /// Run the menu until the operator exits or input ends.
    pub fn run<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> io::Result<()> {
        loop {
            self.screen(console)?;
            writeln!(console, "Welcome {} [GYM Membership Manager]\n", self.owner)?;
            writeln!(console, "1. Search Members")?;
            writeln!(console, "2. View All Members")?;
            writeln!(console, "3. Show Expired Memberships")?;
            writeln!(console, "4. Add Member")?;
            writeln!(console, "5. Update Member data")?;
            writeln!(console, "6. Exit")?;

            let Some(choice) = console.prompt("\nEnter number: ")? else {
                writeln!(console, "\nExiting...")?;
                return Ok(());
            };

            match choice.as_str() {
                "1" => self.search(console)?,
                "2" => self.view_all(console)?,
                "3" => self.show_expired(console)?,
                "4" => self.add(console)?,
                "5" => self.update(console)?,
                "6" => {
                    writeln!(console, "Goodbye {}", self.owner)?;
                    return Ok(());
                }
                _ => {
                    writeln!(console, "Invalid Input!")?;
                    console.pause()?;
                }
            }
        }
    }

    /// Clear the terminal and print the banner.
    fn screen<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> io::Result<()> {
        console.clear_screen()?;
        writeln!(console, "{}", render::header(self.clock.now()))
    }

    fn search<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> io::Result<()> {
        self.screen(console)?;
        writeln!(console, "=== Search Member by Phone ===")?;
        let Some(input) = console.prompt("Enter phone number: ")? else {
            return Ok(());
        };

        match search_members(self.store.members(), &input) {
            Ok(SearchOutcome::Exact(record)) => {
                writeln!(console, "\nFound\n")?;
                writeln!(console, "{}", render::member(record, None))?;
            }
            Ok(SearchOutcome::Partial(matches)) if matches.is_empty() => {
                writeln!(console, "No matching member found.")?;
            }
            Ok(SearchOutcome::Partial(matches)) => {
                writeln!(console, "\nFound {} match(es):\n", matches.len())?;
                writeln!(console, "{}", render::member_list(matches))?;
            }
            Err(e) => writeln!(console, "{}", render::roster_error(&e))?,
        }
        console.pause()
    }

    fn view_all<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> io::Result<()> {
        self.screen(console)?;
        writeln!(console, "=== All Members ===")?;
        if self.store.is_empty() {
            writeln!(console, "No members found.")?;
        } else {
            let sorted = list_members(self.store.members());
            writeln!(console, "{}", render::member_list(sorted))?;
        }
        console.pause()
    }

    fn show_expired<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> io::Result<()> {
        self.screen(console)?;
        writeln!(console, "=== Expired Memberships ===")?;
        if self.store.is_empty() {
            writeln!(console, "No members found.")?;
            return console.pause();
        }

        let expired = expired_members(self.store.members(), self.clock.today());
        if expired.is_empty() {
            writeln!(console, "No expired memberships")?;
        } else {
            writeln!(console, "{}", render::member_list(expired))?;
        }
        console.pause()
    }

    fn add<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> io::Result<()> {
        self.screen(console)?;
        writeln!(console, "=== Add New Member ===")?;

        // Each answer is checked as soon as it is given so the operator is
        // not asked for a plan after typing a bad phone number.
        let Some(name) = console.prompt("Enter member name: ")? else {
            return Ok(());
        };
        if let Err(e) = roster::validate_name(&name) {
            return report(console, &e);
        }

        let Some(phone) = console.prompt("Enter phone number (10 digits): ")? else {
            return Ok(());
        };
        if let Err(e) = roster::validate_new_phone(self.store.members(), &phone) {
            return report(console, &e);
        }

        writeln!(console, "{PLAN_CHOICES}")?;
        let Some(plan) = console.prompt(PLAN_PROMPT)? else {
            return Ok(());
        };

        match add_member(&mut self.store, &name, &phone, &plan, self.clock.today()) {
            Ok(record) => {
                writeln!(console, "\nMember added successfully")?;
                writeln!(console, "{}", render::member(&record, None))?;
                console.pause()
            }
            Err(e) => report(console, &e),
        }
    }

    fn update<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> io::Result<()> {
        self.screen(console)?;
        writeln!(console, "=== Update Member Data ===")?;
        let Some(input) = console.prompt("Enter existing member phone number: ")? else {
            return Ok(());
        };
        let record = match find_member(self.store.members(), &input) {
            Ok(index) => self.store.members()[index].clone(),
            Err(e) => return report(console, &e),
        };

        self.screen(console)?;
        writeln!(console, "Current data:\n")?;
        writeln!(console, "{}", render::member(&record, None))?;
        writeln!(console, "What do you want to update?")?;
        writeln!(console, "1) Name")?;
        writeln!(console, "2) Phone")?;
        writeln!(console, "3) Membership Type (recalculate expiry from same start date)")?;
        writeln!(console, "4) Renew Membership (start date = today, expiry recalculated)")?;
        writeln!(console, "5) Cancel")?;
        let Some(choice) = console.prompt("Enter number: ")? else {
            return Ok(());
        };

        let action = match choice.as_str() {
            "1" => console.prompt("Enter new name: ")?.map(UpdateAction::Rename),
            "2" => console
                .prompt("Enter new phone (10 digits): ")?
                .map(UpdateAction::ChangePhone),
            "3" | "4" => {
                writeln!(console, "{PLAN_CHOICES}")?;
                let token = console.prompt(PLAN_PROMPT)?;
                if choice == "3" {
                    token.map(UpdateAction::ChangePlan)
                } else {
                    token.map(UpdateAction::Renew)
                }
            }
            "5" => {
                writeln!(console, "Cancelled.")?;
                return console.pause();
            }
            _ => {
                writeln!(console, "Invalid choice.")?;
                return console.pause();
            }
        };
        let Some(action) = action else {
            return Ok(());
        };

        match update_member(&mut self.store, &record.phone, action, self.clock.today()) {
            Ok(updated) => {
                writeln!(console, "\nUpdated successfully\n")?;
                writeln!(console, "{}", render::member(&updated, None))?;
                console.pause()
            }
            Err(e) => report(console, &e),
        }
    }
}

/// Show a failed operation and wait for Enter.
fn report<R: BufRead, W: Write>(console: &mut Console<R, W>, err: &RosterError) -> io::Result<()> {
    writeln!(console, "{}", render::roster_error(err))?;
    console.pause()
}
