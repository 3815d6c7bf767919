pub mod show_command;
