//! Fixed trigger table
//!
//! The lexicon is an ordered list of `(trigger, reply)` pairs with an index
//! for exact lookups. Order matters: substring scanning stops at the first
//! trigger contained in the message, even when a later trigger is longer or
//! more specific.

use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A canned reply
///
/// Computed replies run on every lookup so values such as the current date
/// never go stale in a long-running process.
#[derive(Clone)]
pub enum Reply {
    /// Fixed text
    Text(String),
    /// Evaluated at lookup time
    Computed(Arc<dyn Fn() -> String + Send + Sync>),
}

impl Reply {
    /// Fixed reply
    pub fn text(text: impl Into<String>) -> Self {
        Reply::Text(text.into())
    }

    /// Reply produced by `f` each time it is looked up
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Reply::Computed(Arc::new(f))
    }

    /// Produce the reply text
    pub fn render(&self) -> String {
        match self {
            Reply::Text(text) => text.clone(),
            Reply::Computed(f) => f(),
        }
    }
}

impl fmt::Debug for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Reply::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// One row of the table
#[derive(Debug, Clone)]
pub struct LexiconEntry {
    trigger: String,
    reply: Reply,
}

impl LexiconEntry {
    /// Normalized trigger phrase
    pub fn trigger(&self) -> &str {
        &self.trigger
    }

    /// Reply attached to the trigger
    pub fn reply(&self) -> &Reply {
        &self.reply
    }
}

/// Ordered trigger table
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: Vec<LexiconEntry>,
    index: HashMap<String, usize>,
}

/// Trim and lower-case, the key form used for every comparison
pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

impl Lexicon {
    /// Empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry
    ///
    /// A trigger that already exists keeps its position and takes the new
    /// reply. Blank triggers are ignored since they would match every message.
    pub fn insert(&mut self, trigger: &str, reply: Reply) -> &mut Self {
        let trigger = normalize(trigger);
        if trigger.is_empty() {
            tracing::warn!("Ignoring blank lexicon trigger");
            return self;
        }
        match self.index.get(&trigger).copied() {
            Some(pos) => self.entries[pos].reply = reply,
            None => {
                self.index.insert(trigger.clone(), self.entries.len());
                self.entries.push(LexiconEntry { trigger, reply });
            }
        }
        self
    }

    /// Builder form of [`Lexicon::insert`]
    pub fn with(mut self, trigger: &str, reply: Reply) -> Self {
        self.insert(trigger, reply);
        self
    }

    /// Exact lookup on the normalized message
    pub fn lookup_exact(&self, message: &str) -> Option<String> {
        self.index
            .get(&normalize(message))
            .map(|&pos| self.entries[pos].reply.render())
    }

    /// First entry, in table order, whose trigger occurs in `lowered`
    ///
    /// `lowered` must already be lower-cased. Returns the matched trigger
    /// along with the rendered reply.
    pub fn find_substring(&self, lowered: &str) -> Option<(&str, String)> {
        self.entries
            .iter()
            .find(|entry| lowered.contains(entry.trigger.as_str()))
            .map(|entry| (entry.trigger.as_str(), entry.reply.render()))
    }

    /// Entries in table order
    pub fn iter(&self) -> impl Iterator<Item = &LexiconEntry> {
        self.entries.iter()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Long US-style date, e.g. `Tuesday, January 1, 2030`
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Today's date in the local timezone, long form
pub fn local_date() -> String {
    format_long_date(Local::now().date_naive())
}

enum Canned {
    Text(&'static str),
    Date,
}

const FULAFIA_ABOUT: &str = "The Federal University of Lafia (FULafia) is a public university located in Lafia, Nasarawa State, Nigeria. It was established in 2011.";

const DEFAULT_TABLE: &[(&str, Canned)] = &[
    // General chat
    ("hello", Canned::Text("Hi there! How can I help you?")),
    ("how are you", Canned::Text("I'm a bot, but I'm doing great! Thanks for asking.")),
    ("what is your name", Canned::Text("I don't have a name. I am a simple chatbot.")),
    ("bye", Canned::Text("Goodbye! Have a great day.")),
    ("what is the date?", Canned::Date),
    ("what is the current date?", Canned::Date),
    ("date", Canned::Date),
    ("okay", Canned::Text("Alright😊 if there's anything you me to help you with please don't hesistate to ask me!")),
    ("today's date", Canned::Date),
    ("what day is it?", Canned::Date),
    ("what is a computer?", Canned::Text("A computer is an electronic device that manipulates information, or data. It has the ability to store, retrieve, and process data.")),
    ("how does the internet work?", Canned::Text("The internet is a global network of interconnected computer networks that communicate using a standard set of protocols. Information is broken into packets and sent across this network.")),
    ("who created the internet?", Canned::Text("The internet was not created by a single person but was developed over many years by a group of scientists and engineers. Vint Cerf and Bob Kahn are often credited as the 'fathers of the internet' for their work on TCP/IP protocols.")),
    ("what is javascript?", Canned::Text("JavaScript is a programming language that enables interactive web pages. It's often used for front-end development to add dynamic behavior to a website.")),
    ("what is a chatbot?", Canned::Text("A chatbot is a computer program designed to simulate conversation with human users, especially over the internet.")),
    // FULafia
    ("about fulafia", Canned::Text(FULAFIA_ABOUT)),
    ("what is fulafia", Canned::Text(FULAFIA_ABOUT)),
    ("fulafia location", Canned::Text("FULafia is located in Lafia, Nasarawa State, Nigeria.")),
    ("contact fulafia", Canned::Text("You can find contact information for FULafia on their official website: fulafia.edu.ng. For specific issues, you may need to check the relevant department's page.")),
    ("how to apply to fulafia", Canned::Text("To apply to FULafia, you must have chosen the university as your first choice in JAMB and meet the cut-off mark. You then need to register for the post-UTME screening on the university's portal.")),
    ("fulafia post utme portal", Canned::Text("The FULafia Post-UTME application portal is typically found on the university's main website or a dedicated admissions portal. Look for the 'Admissions' or 'Prospective Students' section on fulafia.edu.ng or my.fulafia.edu.ng.")),
    ("fulafia admission requirements", Canned::Text("Admission requires a minimum JAMB score (the specific score varies by year and course), at least five O'Level credits including English and Mathematics, and successful completion of the post-UTME screening. Specific departments may have higher cut-off marks.")),
    ("fulafia admission list", Canned::Text("The FULafia admission list is usually released on the JAMB Central Admission Processing System (CAPS) and also on the university's official portal. You can check your admission status by logging into your JAMB CAPS account.")),
    ("how to check admission status", Canned::Text("You can check your admission status by logging into your JAMB CAPS account. If admitted, you will see a congratulatory message and can accept or reject the offer.")),
    ("fulafia student portal", Canned::Text("The FULafia student portal is where students can log in to perform various tasks like course registration and school fees payment. The URL for the portal is typically my.fulafia.edu.ng or studenthub.fulafia.edu.ng.")),
    ("how to log in to fulafia portal", Canned::Text("To log in to the FULafia portal, you need your Matriculation Number or Applicant ID and your password. If you are a new student, you may use your Applicant ID and the password you created during your application.")),
    ("fulafia portal password reset", Canned::Text("If you forget your password, there is usually a 'Forgot Password' link on the login page of the portal. You will need to enter your user ID or email to reset it.")),
    ("fulafia student login", Canned::Text("Use your Matriculation Number or Applicant ID and password to log in to the FULafia student portal at studenthub.fulafia.edu.ng or my.fulafia.edu.ng.")),
    ("how to pay fulafia school fees", Canned::Text("To pay your school fees at FULafia, you need to log in to the student portal, generate a payment invoice with a unique RRR code, and then make the payment online using a card or at any commercial bank.")),
    ("fulafia school fees payment guide", Canned::Text("Login to the portal, go to the 'FEES' menu, select the session, and click 'Generate invoice'. You can then pay via Remita using options like USSD, bank transfer, or card payment.")),
    ("fulafia school fees portal", Canned::Text("The school fees payment is done directly on the FULafia student portal after you log in. Payments are typically processed via the Remita platform.")),
    ("what is remita", Canned::Text("Remita is a payment gateway used by FULafia and many other institutions in Nigeria to process online and bank-based payments.")),
    ("fulafia acceptance fee", Canned::Text("After gaining admission, new students must pay an acceptance fee before they can proceed with other registrations. This is done on the student portal after accepting the admission offer on JAMB CAPS.")),
    ("fulafia course registration", Canned::Text("Course registration is done on the student portal after you have successfully paid your school fees. You must register your courses for each semester before the deadline.")),
    ("fulafia clearance", Canned::Text("After being admitted and paying your fees, you will need to go through a physical and online clearance process. This involves presenting your original credentials at your department for verification.")),
    ("fulafia matriculation number", Canned::Text("Your matriculation number is assigned to you after you have successfully paid your acceptance and school fees. It will be sent to your registered email address or appear on your dashboard after you log in again.")),
];

static DEFAULT_LEXICON: Lazy<Arc<Lexicon>> = Lazy::new(|| {
    let mut lexicon = Lexicon::new();
    for (trigger, canned) in DEFAULT_TABLE {
        let reply = match canned {
            Canned::Text(text) => Reply::text(*text),
            Canned::Date => Reply::computed(local_date),
        };
        lexicon.insert(trigger, reply);
    }
    tracing::debug!(entries = lexicon.len(), "Built default lexicon");
    Arc::new(lexicon)
});

/// Shared built-in table, constructed once per process
pub fn default_lexicon() -> Arc<Lexicon> {
    DEFAULT_LEXICON.clone()
}
