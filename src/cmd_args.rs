use std::ffi::OsString;

pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about = "Look up accumulated complementary hours", long_about = None)]
struct ClapArgs {
    /// Profile name to read settings from. Default is 'default'.
    /// A missing profile falls back to built-in settings.
    #[clap(short = 'p', long, default_value = "default", help = "profile name")]
    profile: String,

    /// Override the hours API endpoint from the profile
    #[clap(long, help = "hours API endpoint")]
    api_url: Option<String>,

    /// Identifier to prefill, or to look up with --once
    #[clap(short = 'm', long, help = "student identifier (matrícula)")]
    matricula: Option<String>,

    /// Run a single lookup, print the result and exit
    #[clap(long, requires = "matricula", help = "look up once and exit")]
    once: bool,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    profile: String,
    api_url: Option<String>,
    matricula: Option<String>,
    once: bool,
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            profile: args.profile,
            api_url: args.api_url,
            matricula: args.matricula,
            once: args.once,
        }
    }
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        ClapArgs::parse().into()
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::parse_from(itr).into()
    }

    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::try_parse_from(itr).map(Into::into)
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    pub fn api_url(&self) -> Option<&str> {
        self.api_url.as_deref()
    }

    pub fn matricula(&self) -> Option<&str> {
        self.matricula.as_deref()
    }

    pub fn once(&self) -> bool {
        self.once
    }
}
