pub const PROMPT: &str = "> ";
pub const GRID_COLUMNS: usize = 2;
pub const GRID_CELL_WIDTH: usize = 36;

pub const HELP: &str = "\
Commands:
  search <text>   show characters whose name starts with <text>
  clear           drop the active search
  next | prev     move between pages
  sort asc|desc   order the current page by name
  view            switch between list and grid layout
  fav <id>        toggle favorite for a character
  show <id>       show character details
  help            print this text
  quit            exit
";
