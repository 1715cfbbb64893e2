mod elapsed;
