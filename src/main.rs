use photarium::app::{self, Flags};

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    let flags = Flags {
        api_url: args.opt_value_from_str("--api-url").unwrap_or(None),
        storage_url: args.opt_value_from_str("--storage-url").unwrap_or(None),
        data_dir: args.opt_value_from_str("--data-dir").unwrap_or(None),
        config_dir: args.opt_value_from_str("--config-dir").unwrap_or(None),
    };

    app::run(flags)
}
