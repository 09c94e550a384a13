use std::str::FromStr;

/// Parse `"a,b"` into a pair, as used for command-line options such as pixel
/// counts and centroids.
pub fn parse_pair<T>(s: &str) -> Result<(T, T), String>
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    let v = s.split(',').map(str::trim).collect::<Vec<_>>();
    let &[x, y] = v.as_slice() else {
        return Err(format!("expected two comma-separated values, got `{s}`"))
    };
    let parse = |item: &str| item.parse::<T>().map_err(|e| format!("`{item}`: {e}"));
    Ok((parse(x)?, parse(y)?))
}

/// Group numeric digits to facilitate reading long numbers
pub fn group_digits<F: std::fmt::Display>(n: F) -> String {
    use numsep::{separate, Locale};
    separate(n, Locale::English)
}


pub mod timing {

    use super::group_digits;
    use std::time::Instant;
    use std::io::Write;

    pub struct Progress {
        previous: Instant,
    }

    impl Progress {

        #[allow(clippy::new_without_default)]
        pub fn new() -> Self { Self { previous: Instant::now() } }

        /// Print message, append ellipsis, flush stdout, stay on same line, start timer.
        pub fn start(&mut self, message: &str) {
            print!("{message} ... ");
            let _ = std::io::stdout().flush();
            self.start_timer();
        }

        /// Print message, go to next line, start timer
        pub fn startln(&mut self, message: &str) {
            self.start(message);
            println!();
            self.start_timer();
        }

        // Print time elapsed since last start or done
        pub fn done(&mut self) {
            println!("{} ms", group_digits(self.previous.elapsed().as_millis()));
            self.start_timer();
        }

        fn start_timer(&mut self) { self.previous = Instant::now() }
    }
}
