mod panels;
mod reader;
