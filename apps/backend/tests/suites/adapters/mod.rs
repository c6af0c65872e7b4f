mod users_sea;
